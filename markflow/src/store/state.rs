//! The run state store.

use std::path::PathBuf;
use tracing::{debug, warn};

use crate::errors::MarkflowError;
use crate::models::RunState;
use crate::util::iso_timestamp;

/// Durable store for last-check/last-processed markers.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store over the state document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the persisted state.
    ///
    /// A missing or corrupt file yields the zero-value default, never an
    /// error.
    #[must_use]
    pub fn load(&self) -> RunState {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "no state file, using defaults");
                return RunState::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "corrupt state file, using defaults");
                RunState::default()
            }
        }
    }

    /// Persists the state document atomically.
    pub fn save(&self, state: &RunState) -> Result<(), MarkflowError> {
        let contents = serde_json::to_string_pretty(state)?;
        super::write_atomic(&self.path, &contents)?;
        Ok(())
    }

    /// Read-modify-write that stamps `last_check` with the current time.
    ///
    /// The other fields are preserved untouched; they are reserved for
    /// future extension.
    pub fn touch_last_check(&self) -> Result<RunState, MarkflowError> {
        let mut state = self.load();
        state.last_check = Some(iso_timestamp());
        self.save(&state)?;
        Ok(state)
    }
}
