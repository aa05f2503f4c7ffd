use chrono::NaiveDateTime;

use super::{Clock, StateStore};
use crate::error::StorageError;
use crate::state::GameState;

/// In-memory store. Can be told to reject writes to exercise failure paths.
#[derive(Debug)]
pub struct MemoryStore<C: Clock> {
    stored: Option<GameState>,
    clock: C,
    reject_writes: bool,
    saves: usize,
}

impl<C: Clock> MemoryStore<C> {
    pub fn new(clock: C) -> Self {
        Self { stored: None, clock, reject_writes: false, saves: 0 }
    }

    pub fn with_state(clock: C, state: GameState) -> Self {
        Self { stored: Some(state), ..Self::new(clock) }
    }

    pub fn reject_writes(&mut self, yes: bool) {
        self.reject_writes = yes;
    }

    pub fn stored(&self) -> Option<&GameState> {
        self.stored.as_ref()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl<C: Clock> StateStore for MemoryStore<C> {
    fn load(&mut self) -> Result<GameState, StorageError> {
        match &self.stored {
            Some(state) => Ok(state.clone()),
            None => {
                let state = GameState::new_at(self.now());
                self.save(&state)?;
                Ok(state)
            }
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected);
        }
        self.stored = Some(state.clone());
        self.saves += 1;
        Ok(())
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
