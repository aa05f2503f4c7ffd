//! State Store: owns the persisted [`GameState`] and its
//! load / initialize / save lifecycle, plus the wall-clock seam.
//!
//! Two backends:
//! - [`JsonFileStore`] writes the JSON save record to disk.
//! - [`MemoryStore`] keeps the state in memory (tests, pacing simulation).
//!
//! Every backend reads the time through a [`Clock`], so accrual can be made
//! deterministic by plugging in a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::state::GameState;

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

pub trait StateStore {
    /// Current persisted state. If nothing is persisted yet, the default
    /// first-run state is created at [`StateStore::now`], saved, and returned.
    fn load(&mut self) -> Result<GameState, StorageError>;

    /// Persist the full state, replacing whatever was stored before.
    fn save(&mut self, state: &GameState) -> Result<(), StorageError>;

    fn now(&self) -> NaiveDateTime;
}

/// What to do when the persisted content cannot be parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptSavePolicy {
    /// Surface [`StorageError::Malformed`] and leave the file alone.
    #[default]
    Fail,
    /// Move the bad file aside and start from the first-run state.
    Reinitialize,
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock, truncated to whole seconds (the save format's precision).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let t = Local::now().naive_local();
        t.with_nanosecond(0).unwrap_or(t)
    }
}

/// Settable clock. Clones share the same instant.
#[derive(Clone, Debug)]
pub struct ManualClock(Rc<Cell<NaiveDateTime>>);

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self(Rc::new(Cell::new(start)))
    }

    pub fn set(&self, t: NaiveDateTime) {
        self.0.set(t);
    }

    /// Move the clock by `secs` (negative moves it backwards).
    pub fn advance_secs(&self, secs: i64) {
        let t = self.0.get();
        let next = TimeDelta::try_seconds(secs)
            .and_then(|d| t.checked_add_signed(d))
            .unwrap_or(t);
        self.0.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.0.get()
    }
}
