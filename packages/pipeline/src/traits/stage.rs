//! The Stage Contract - the uniform abstraction each pipeline stage implements.
//!
//! A stage declares its input and output artifact kinds and exposes one
//! `run` operation. `run` must be deterministic given identical inputs and
//! identical collaborator replies. The orchestrator schema-validates every
//! stage output before forwarding it; a schema failure there is a stage
//! failure, never silently passed on.

use async_trait::async_trait;

use crate::error::{StageError, StageResult};
use crate::types::artifact::{Artifact, ArtifactKind};
use crate::types::fact::FactSet;
use crate::types::outline::Outline;
use crate::types::summary::Summary;

/// Read-only view of the run's artifacts handed to a stage.
///
/// Artifacts are immutable once produced: the orchestrator owns them and
/// stages only ever see shared references. A stage takes what its declared
/// input kinds name and must treat everything else as absent.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    /// The original document text
    pub raw_text: &'a str,

    /// Extractor output, if produced
    pub facts: Option<&'a FactSet>,

    /// Structurer output, if produced
    pub outline: Option<&'a Outline>,

    /// Summarizer output, if produced
    pub summary: Option<&'a Summary>,
}

impl<'a> StageInput<'a> {
    /// Input for the first stage: just the document text.
    pub fn from_text(raw_text: &'a str) -> Self {
        Self {
            raw_text,
            facts: None,
            outline: None,
            summary: None,
        }
    }

    /// The fact set, or a `MissingInput` stage error.
    pub fn require_facts(&self) -> StageResult<&'a FactSet> {
        self.facts.ok_or(StageError::MissingInput {
            kind: ArtifactKind::Facts,
        })
    }

    /// The outline, or a `MissingInput` stage error.
    pub fn require_outline(&self) -> StageResult<&'a Outline> {
        self.outline.ok_or(StageError::MissingInput {
            kind: ArtifactKind::Outline,
        })
    }
}

/// One transformation stage of the pipeline.
///
/// Concrete stages are fixed, statically known implementations selected by
/// pipeline position - there is no runtime stage graph.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stage name as it appears in the trace.
    fn name(&self) -> &'static str;

    /// Artifact kinds this stage consumes.
    fn input_kinds(&self) -> &'static [ArtifactKind];

    /// Artifact kind this stage produces.
    fn output_kind(&self) -> ArtifactKind;

    /// Execute the stage against the run's artifacts.
    async fn run(&self, input: StageInput<'_>) -> StageResult<Artifact>;
}
