use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::gro::GroError;
use crate::core::io::ndx::NdxError;

/// Broad classification of engine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid settings; raised before any interactive work where possible.
    Configuration,
    /// A malformed selection pattern; recoverable by asking again.
    InputFormat,
    /// Reading, writing or prompting failed.
    Io,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid selection pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Group '{name}' would be produced by both residue '{first}' and residue '{second}'")]
    GroupNameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Input ended while waiting for {expected}")]
    InputClosed { expected: &'static str },

    #[error("Prompt I/O failed: {0}")]
    Prompt(#[from] io::Error),

    #[error("Failed to read structure '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: GroError,
    },

    #[error("Failed to write index: {0}")]
    Index(#[from] NdxError),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Config(_) | EngineError::GroupNameCollision { .. } => {
                ErrorKind::Configuration
            }
            EngineError::InvalidPattern { .. } => ErrorKind::InputFormat,
            EngineError::InputClosed { .. }
            | EngineError::Prompt(_)
            | EngineError::Structure { .. }
            | EngineError::Index(_) => ErrorKind::Io,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::InputFormat
    }
}
