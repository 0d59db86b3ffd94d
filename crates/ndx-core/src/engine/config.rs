use super::grouping::CombineStrategy;
use crate::core::io::ndx::{DEFAULT_CHUNK_SIZE, WriteOptions};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unrecognized combination strategy '{0}'. Expected 'resnum' or 'atomname'.")]
    UnknownStrategy(String),

    #[error("Chunk size must be at least 1 (got {0})")]
    InvalidChunkSize(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub strategy: CombineStrategy,
    pub output: WriteOptions,
}

#[derive(Default)]
pub struct WorkflowConfigBuilder {
    strategy: Option<CombineStrategy>,
    chunk_size: Option<usize>,
    backup: Option<bool>,
}

impl WorkflowConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: CombineStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }
    pub fn backup(mut self, backup: bool) -> Self {
        self.backup = Some(backup);
        self
    }

    pub fn build(self) -> Result<WorkflowConfig, ConfigError> {
        let strategy = self
            .strategy
            .ok_or(ConfigError::MissingParameter("strategy"))?;
        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }
        Ok(WorkflowConfig {
            strategy,
            output: WriteOptions {
                chunk_size,
                backup: self.backup.unwrap_or(true),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_applies_defaults_for_optional_parameters() {
        let config = WorkflowConfigBuilder::new()
            .strategy(CombineStrategy::AtomName)
            .build()
            .unwrap();
        assert_eq!(config.strategy, CombineStrategy::AtomName);
        assert_eq!(config.output.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(config.output.backup);
    }

    #[test]
    fn build_uses_explicit_values() {
        let config = WorkflowConfigBuilder::new()
            .strategy(CombineStrategy::ResidueNumber)
            .chunk_size(10)
            .backup(false)
            .build()
            .unwrap();
        assert_eq!(config.output.chunk_size, 10);
        assert!(!config.output.backup);
    }

    #[test]
    fn build_requires_strategy() {
        let result = WorkflowConfigBuilder::new().chunk_size(10).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("strategy")));
    }

    #[test]
    fn build_rejects_zero_chunk_size() {
        let result = WorkflowConfigBuilder::new()
            .strategy(CombineStrategy::ResidueNumber)
            .chunk_size(0)
            .build();
        assert_eq!(result, Err(ConfigError::InvalidChunkSize(0)));
    }
}
