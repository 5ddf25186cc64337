//! Pipeline orchestration.
//!
//! - [`prompts`] - prompt templates and formatting for the generative stages
//! - [`runner`] - the state machine that drives the stages in order

pub mod prompts;
pub mod runner;

pub use runner::{Pipeline, PipelineState, RunArtifacts, RunOutcome, StageFailure};
