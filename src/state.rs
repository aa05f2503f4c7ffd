//! Persisted game state.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::catalog::RideCatalog;
use crate::error::StorageError;

/// Timestamp layout of `last_played`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Balance, ride levels and the last accrual point.
///
/// `ride_levels[i]` is the level of catalogue ride `i`; its length is the
/// number of unlocked rides. Field names on disk follow the legacy save
/// layout (`money`, `money_methods`, `last_played`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(rename = "money_methods")]
    pub ride_levels: Vec<u32>,
    #[serde(rename = "last_played", with = "timestamp")]
    pub last_played_at: NaiveDateTime,
    #[serde(rename = "money")]
    pub balance: f64,
}

impl GameState {
    /// First-run state: one ride at level 1, no money.
    pub fn new_at(now: NaiveDateTime) -> Self {
        Self { ride_levels: vec![1], last_played_at: now, balance: 0.0 }
    }

    pub fn unlocked_count(&self) -> usize {
        self.ride_levels.len()
    }

    pub fn level_of(&self, index: usize) -> Option<u32> {
        self.ride_levels.get(index).copied()
    }

    /// Check the invariants a loaded save must satisfy against `catalog`.
    pub fn validate(&self, catalog: &RideCatalog) -> Result<(), StorageError> {
        if !(self.balance.is_finite() && self.balance >= 0.0) {
            return Err(StorageError::InvalidState(format!(
                "balance {} is negative or not finite",
                self.balance
            )));
        }
        if self.ride_levels.len() > catalog.len() {
            return Err(StorageError::InvalidState(format!(
                "{} rides unlocked but the catalogue has {}",
                self.ride_levels.len(),
                catalog.len()
            )));
        }
        if let Some(i) = self.ride_levels.iter().position(|&l| l == 0) {
            return Err(StorageError::InvalidState(format!("ride {i} has level 0")));
        }
        Ok(())
    }
}

/// `serde(with)` adapter for the fixed `YYYY-MM-DD HH:MM:SS` layout.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
