//! Game configuration: where the save lives, the ride table, the economy
//! constants, and how to treat a corrupt save.
//!
//! Every field has a default, so a config file only needs the overrides:
//!
//! ```json
//! { "save_path": "saves/park.json", "on_corrupt_save": "reinitialize" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{RideCatalog, Tuning};
use crate::economy::Economy;
use crate::error::{ConfigError, StorageError};
use crate::progression::Session;
use crate::store::{Clock, CorruptSavePolicy, JsonFileStore};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub save_path: PathBuf,
    pub catalog: RideCatalog,
    pub tuning: Tuning,
    pub on_corrupt_save: CorruptSavePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("data.json"),
            catalog: RideCatalog::default(),
            tuning: Tuning::default(),
            on_corrupt_save: CorruptSavePolicy::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }

    pub fn economy(&self) -> Economy {
        Economy::new(self.catalog.clone(), self.tuning)
    }

    /// File store at `save_path` honouring `on_corrupt_save`.
    pub fn store_with_clock<C: Clock>(&self, clock: C) -> JsonFileStore<C> {
        JsonFileStore::with_clock(&self.save_path, clock).on_corrupt(self.on_corrupt_save)
    }

    /// Open a session on the configured save file.
    pub fn open_session<C: Clock>(
        &self,
        clock: C,
    ) -> Result<Session<JsonFileStore<C>>, StorageError> {
        Session::open(self.economy(), self.store_with_clock(clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GameConfig::from_json_str("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_overrides() {
        let cfg = GameConfig::from_json_str(
            r#"{ "save_path": "park.json",
                 "tuning": { "upgrade_growth": 1.6 },
                 "on_corrupt_save": "reinitialize" }"#,
        )
        .unwrap();
        assert_eq!(cfg.save_path, PathBuf::from("park.json"));
        assert_eq!(cfg.tuning.upgrade_growth, 1.6);
        assert_eq!(cfg.tuning.level_kink, 10);
        assert_eq!(cfg.on_corrupt_save, CorruptSavePolicy::Reinitialize);
        assert_eq!(cfg.catalog, RideCatalog::default());
    }

    #[test]
    fn bad_catalogue_is_a_config_error() {
        let err = GameConfig::from_json_str(r#"{ "catalog": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_tuning_is_a_config_error() {
        for raw in [
            r#"{ "tuning": { "upgrade_growth": 0.9 } }"#,
            r#"{ "tuning": { "upgrade_base_floor": 0.0 } }"#,
        ] {
            let err = GameConfig::from_json_str(raw).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{raw} accepted");
            assert!(err.to_string().contains("out of range"), "{err}");
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
