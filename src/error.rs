//! Error taxonomy.
//!
//! `StorageError` is fatal to the operation that hit it. The declines in
//! [`ProgressionError`] (`RideNotUnlocked`, `AllRidesUnlocked`,
//! `InsufficientFunds`) are ordinary outcomes of player input; none of them
//! mutates state.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("save data violates game invariants: {0}")]
    InvalidState(String),
    #[error("store refused the write")]
    WriteRejected,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("ride catalogue is empty")]
    Empty,
    #[error("ride {index} ({name}) has a negative or non-finite {field}")]
    BadNumber {
        index: usize,
        name: String,
        field: &'static str,
    },
    #[error("ride {index} unlock price {price:.2} is below the previous ride's {previous:.2}")]
    PriceDecreases { index: usize, price: f64, previous: f64 },
    #[error("tuning {field} = {value} is out of range")]
    BadTuning { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("no ride at index {0}")]
    InvalidRideIndex(usize),
    #[error("ride {0} has not been unlocked yet")]
    RideNotUnlocked(usize),
    #[error("every ride is already unlocked")]
    AllRidesUnlocked,
    #[error("not enough money (requires {needed:.2}, have {available:.2})")]
    InsufficientFunds { needed: f64, available: f64 },
    #[error("upgrade count must be at least 1")]
    InvalidUpgradeCount,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
