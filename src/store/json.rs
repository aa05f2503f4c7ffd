use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::{Clock, CorruptSavePolicy, StateStore, SystemClock};
use crate::error::StorageError;
use crate::state::GameState;

/// JSON save file on disk.
///
/// Saves go to `<path>.tmp` first and are renamed over `<path>`, so an
/// interrupted write leaves the previous save readable.
#[derive(Debug)]
pub struct JsonFileStore<C: Clock = SystemClock> {
    path: PathBuf,
    clock: C,
    on_corrupt: CorruptSavePolicy,
}

impl JsonFileStore<SystemClock> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> JsonFileStore<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self { path: path.into(), clock, on_corrupt: CorruptSavePolicy::default() }
    }

    pub fn on_corrupt(mut self, policy: CorruptSavePolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io { path: self.path.clone(), source }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn initialize(&mut self) -> Result<GameState, StorageError> {
        let state = GameState::new_at(self.now());
        self.save(&state)?;
        info!("created new save at {}", self.path.display());
        Ok(state)
    }
}

impl<C: Clock> StateStore for JsonFileStore<C> {
    fn load(&mut self) -> Result<GameState, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.initialize(),
            Err(e) => return Err(self.io_err(e)),
        };

        match serde_json::from_str::<GameState>(&raw) {
            Ok(state) => {
                debug!("loaded save from {}", self.path.display());
                Ok(state)
            }
            Err(e) => match self.on_corrupt {
                CorruptSavePolicy::Fail => Err(e.into()),
                CorruptSavePolicy::Reinitialize => {
                    let aside = self.sibling(".corrupt");
                    warn!(
                        "save {} is malformed ({e}); moving it to {} and starting over",
                        self.path.display(),
                        aside.display()
                    );
                    fs::rename(&self.path, &aside).map_err(|e| self.io_err(e))?;
                    self.initialize()
                }
            },
        }
    }

    fn save(&mut self, state: &GameState) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        state.serialize(&mut ser)?;

        let tmp = self.sibling(".tmp");
        fs::write(&tmp, &buf).map_err(|e| self.io_err(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }
        debug!("saved {} bytes to {}", buf.len(), self.path.display());
        Ok(())
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}
