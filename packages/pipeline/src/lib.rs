//! Document-to-artifact prompt chaining with cross-artifact validation.
//!
//! Converts unstructured document text into verified structured artifacts
//! through a fixed sequence of single-responsibility stages: extract atomic
//! facts, organize them into an outline, write a summary, then cross-check
//! everything. Each stage consumes the prior stage's artifact and produces
//! a new one; nothing is mutated in place.
//!
//! # Design
//!
//! - **Fixed linear order.** Stages run strictly left to right, and a stage
//!   never runs on invalid input. When something goes wrong, the trace says
//!   exactly which stage, on exactly which artifacts.
//! - **Evidence-grounded.** Every fact carries a source reference, every
//!   outline node cites fact ids, every summary segment cites node ids.
//!   The validator holds the chain to those citations and flags claims it
//!   cannot trace back to a fact.
//! - **Validation findings are data, not errors.** The validator never
//!   aborts a run; its findings land in the report with a pass/fail status.
//!
//! # Example
//!
//! ```rust,no_run
//! use pipeline::{Pipeline, PipelineConfig};
//! use pipeline::testing::MockCollaborator;
//!
//! # async fn example() {
//! let pipeline = Pipeline::new(MockCollaborator::default())
//!     .with_config(PipelineConfig::default().with_stage_timeout_secs(30));
//!
//! let outcome = pipeline.run("Last quarter revenue grew by 10%.").await;
//! if let Some(report) = &outcome.report {
//!     println!("{} issues, passed: {}", report.issues.len(), report.passed());
//! }
//! # }
//! ```

pub mod ai;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod schema;
pub mod security;
pub mod stages;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{CollaboratorError, SchemaError, StageError};
pub use pipeline::{Pipeline, PipelineState, RunArtifacts, RunOutcome, StageFailure};
pub use traits::collaborator::{Collaborator, PromptKind};
pub use traits::stage::{Stage, StageInput};
pub use types::artifact::{Artifact, ArtifactKind};
pub use types::config::PipelineConfig;
pub use types::fact::{Fact, FactSet};
pub use types::outline::{Outline, OutlineNode};
pub use types::report::{
    IssueCategory, OverallStatus, Severity, ValidationIssue, ValidationReport,
};
pub use types::summary::{Summary, SummarySegment};
pub use types::trace::{StageStatus, Trace, TraceEvent};

#[cfg(feature = "openai")]
pub use ai::OpenAiCollaborator;
