//! Search counter collaborators
//!
//! The counter only labels summary reports. It is read once when a search
//! starts and bumped once when it completes. There is no locking: two
//! processes sharing a counter file can lose increments, so callers that
//! search concurrently must serialize access themselves.

use crate::error::SearchError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// Well-known counter file, relative to the working directory
pub const DEFAULT_COUNTER_FILE: &str = "SearchsDone.txt";

pub trait SearchCounter {
    /// Current value; a missing or unreadable store counts as 0
    fn read(&self) -> u64;

    /// Add one, persist it and return the new value
    fn increment_and_persist(&mut self) -> Result<u64, SearchError>;
}

/// Counter stored as a decimal number in a text file
#[derive(Debug, Clone)]
pub struct FileSearchCounter {
    path: PathBuf,
}

impl FileSearchCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileSearchCounter {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTER_FILE)
    }
}

impl SearchCounter for FileSearchCounter {
    fn read(&self) -> u64 {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "counter unreadable, starting at 0");
                return 0;
            }
        };

        match content.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(path = %self.path.display(), "counter unparseable, starting at 0");
                0
            }
        }
    }

    fn increment_and_persist(&mut self) -> Result<u64, SearchError> {
        let next = self.read().saturating_add(1);
        fs::write(&self.path, format!("{next}\n")).map_err(|source| {
            SearchError::CounterFailure {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(next)
    }
}

/// Process-local counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InMemoryCounter {
    value: u64,
}

impl InMemoryCounter {
    pub fn starting_at(value: u64) -> Self {
        Self { value }
    }
}

impl SearchCounter for InMemoryCounter {
    fn read(&self) -> u64 {
        self.value
    }

    fn increment_and_persist(&mut self) -> Result<u64, SearchError> {
        self.value = self.value.saturating_add(1);
        Ok(self.value)
    }
}
