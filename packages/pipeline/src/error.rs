//! Typed errors for the pipeline library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The taxonomy follows the
//! failure semantics of the pipeline: `SchemaError` for malformed artifact
//! shapes, `StageError` for stage-level failures that abort a run, and
//! `CollaboratorError` for failures of the external language-model call.
//! Semantic defects found by the validator are not errors at all; they are
//! reported as `ValidationIssue`s and never abort a run.

use thiserror::Error;

use crate::types::artifact::ArtifactKind;

/// A structural violation of an artifact schema.
///
/// Produced by the schema layer (`crate::schema`). Carries the offending
/// field path and the reason, so a failed run names exactly what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation at {field}: {reason}")]
pub struct SchemaError {
    /// Path of the offending field (e.g. `facts[2].source_reference`)
    pub field: String,

    /// Why the field is invalid
    pub reason: String,
}

impl SchemaError {
    /// Create a new schema error.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a stage (and therefore the run).
#[derive(Debug, Error)]
pub enum StageError {
    /// The external collaborator call failed
    #[error("collaborator call failed: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// The stage did not finish within the configured timeout
    #[error("stage timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The collaborator reply could not be parsed into the artifact schema
    #[error("malformed collaborator response: {reason}")]
    MalformedResponse { reason: String },

    /// A required upstream artifact was not provided
    #[error("missing input artifact: {kind}")]
    MissingInput { kind: ArtifactKind },

    /// The stage output failed schema validation
    #[error("stage output rejected: {0}")]
    Schema(#[from] SchemaError),

    /// The run was abandoned between stages
    #[error("run cancelled")]
    Cancelled,
}

/// Errors from the external collaborator (language model).
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// The request timed out
    #[error("collaborator request timed out")]
    Timeout,

    /// Quota or rate limit exhausted
    #[error("collaborator quota exhausted")]
    Quota,

    /// Credentials missing or rejected
    #[error("collaborator rejected credentials: {0}")]
    Auth(String),

    /// Transport or HTTP-level failure
    #[error("collaborator HTTP error: {0}")]
    Http(String),

    /// The collaborator returned no content
    #[error("collaborator returned an empty response")]
    Empty,
}

/// Result type alias for stage operations.
pub type StageResult<T> = std::result::Result<T, StageError>;

/// Result type alias for collaborator operations.
pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;
