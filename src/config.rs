//! Settings for building an [`NGramModel`](crate::NGramModel).

use crate::error::{NGramError, Result};

/// What to do when the training file cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadErrorPolicy {
    /// Log a warning and keep going with an empty model.
    #[default]
    Lenient,
    /// Return [`NGramError::Io`].
    Strict,
}

/// Configuration of an n-gram model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelConfig {
    /// Number of tokens per n-gram. Must be at least 1.
    pub order: usize,
    /// Character that separates sentences when feeding whole texts.
    pub sentence_delimiter: char,
    /// Behaviour when the training file cannot be read.
    pub on_read_error: ReadErrorPolicy,
}

impl ModelConfig {
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// Checks that the configuration describes a usable model.
    pub fn validate(&self) -> Result<()> {
        if self.order == 0 {
            return Err(NGramError::InvalidOrder(self.order));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            order: 2,
            sentence_delimiter: '.',
            on_read_error: ReadErrorPolicy::default(),
        }
    }
}

/// Builder for [`ModelConfig`], starting from [`ModelConfig::default()`].
#[derive(Clone, Debug, Default)]
pub struct ModelConfigBuilder {
    cfg: ModelConfig,
}

impl ModelConfigBuilder {
    #[must_use]
    pub fn order(mut self, order: usize) -> Self {
        self.cfg.order = order;
        self
    }

    #[must_use]
    pub fn sentence_delimiter(mut self, delimiter: char) -> Self {
        self.cfg.sentence_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn on_read_error(mut self, policy: ReadErrorPolicy) -> Self {
        self.cfg.on_read_error = policy;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<ModelConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}
