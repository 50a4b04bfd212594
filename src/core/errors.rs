//! Error types for firestore-perf
//!
//! This module defines the error taxonomy shared by the store backends,
//! the emulator reset client and the benchmark harness.

use thiserror::Error;
use crate::bench::Phase;

/// Errors that can occur while seeding or querying the document store
#[derive(Error, Debug)]
pub enum PerfError {
    /// A required setting (usually from the environment) is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The emulator or the database service could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// Document content could not be decoded
    #[error("Data error: {0}")]
    Data(String),

    /// An error that aborted the benchmark run
    #[error("Fatal error while {phase}: {source}")]
    Fatal {
        phase: Phase,
        source: Box<PerfError>,
    },
}

impl PerfError {
    /// Wrap this error as fatal for the given phase
    pub fn fatal(self, phase: Phase) -> Self {
        if self.is_fatal() {
            return self;
        }
        PerfError::Fatal {
            phase,
            source: Box::new(self),
        }
    }

    /// Check if the error aborted the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, PerfError::Fatal { .. })
    }
}

impl From<reqwest::Error> for PerfError {
    fn from(error: reqwest::Error) -> Self {
        PerfError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for PerfError {
    fn from(error: serde_json::Error) -> Self {
        PerfError::Data(error.to_string())
    }
}

/// Result type for store and harness operations
pub type Result<T> = std::result::Result<T, PerfError>;
