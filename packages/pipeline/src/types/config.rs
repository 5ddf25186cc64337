//! Configuration for the pipeline.
//!
//! Passed explicitly at construction; there is no global configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model identifier handed to the collaborator
    pub model: String,

    /// Sampling temperature for generation calls
    pub temperature: f32,

    /// Token ceiling per collaborator call
    pub max_tokens: u32,

    /// Per-stage timeout in seconds.
    ///
    /// A stage that exceeds this is a `StageError::Timeout`, which aborts
    /// the run; it is never a crash.
    pub stage_timeout_secs: u64,

    /// Maximum length of a fact statement; longer statements are truncated
    /// during extractor normalization. Default: 140.
    pub max_statement_len: usize,

    /// Drop extracted facts whose source_reference cannot be matched back
    /// to the input document (substring or word-overlap match).
    ///
    /// When true, unmatchable references are discarded with a warning -
    /// close paraphrases still pass the word-overlap check, but freely
    /// invented quotes do not. Default: true.
    pub strict_provenance: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 1200,
            stage_timeout_secs: 60,
            max_statement_len: 140,
            strict_provenance: true,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the per-call token ceiling.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the per-stage timeout.
    pub fn with_stage_timeout_secs(mut self, secs: u64) -> Self {
        self.stage_timeout_secs = secs;
        self
    }

    /// Set strict provenance filtering.
    pub fn with_strict_provenance(mut self, strict: bool) -> Self {
        self.strict_provenance = strict;
        self
    }

    /// The per-stage timeout as a `Duration`.
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let config = PipelineConfig::new()
            .with_model("gpt-4o")
            .with_stage_timeout_secs(5)
            .with_strict_provenance(false);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.stage_timeout(), Duration::from_secs(5));
        assert!(!config.strict_provenance);
        assert_eq!(config.max_statement_len, 140);
    }
}
