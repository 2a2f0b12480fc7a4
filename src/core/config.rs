/// Generator configuration — RON-loadable settings for training and sampling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed RNG seed; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Sentences printed per run.
    pub sentence_count: usize,
    /// Minimum words per generated sentence.
    pub min_words: usize,
    /// Walks tried before settling for the longest one.
    pub max_attempts: u32,
    /// Word window for the text chain.
    pub history: usize,
    /// Words emitted by the text chain.
    pub word_count: usize,
    /// Transitions taken after picking a random text chain start.
    pub burn_in: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sentence_count: 15,
            min_words: 7,
            max_attempts: 1000,
            history: 2,
            word_count: 100,
            burn_in: 10,
        }
    }
}

impl GeneratorConfig {
    pub fn load_from_ron(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<GeneratorConfig, ConfigError> {
        let config: GeneratorConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history == 0 {
            return Err(ConfigError::Invalid("history must be at least 1".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
