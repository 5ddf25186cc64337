//! The orchestrator: a fixed linear state machine over the four stages.
//!
//! `Idle -> ExtractingFacts -> Structuring -> Summarizing -> Validating ->
//! Done`, with `Aborted` reachable from any non-terminal state. The pipeline
//! advances only after a stage's output passes schema validation; a stage
//! failure aborts the run so every downstream artifact stays attributable
//! to valid input.
//!
//! The validator still runs when the extractor aborted (it reports over
//! whatever exists, which may be nothing). When the structurer or the
//! summarizer aborted, it does not run; the report is then a single finding
//! that names the stage that stopped the run.

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::StageError;
use crate::schema;
use crate::stages::extractor::FactExtractor;
use crate::stages::structurer::Structurer;
use crate::stages::summarizer::Summarizer;
use crate::stages::validator::Validator;
use crate::traits::collaborator::Collaborator;
use crate::traits::stage::{Stage, StageInput};
use crate::types::artifact::{doc_content_id, Artifact};
use crate::types::config::PipelineConfig;
use crate::types::fact::FactSet;
use crate::types::outline::Outline;
use crate::types::report::ValidationReport;
use crate::types::summary::Summary;
use crate::types::trace::{Trace, TraceEvent};

/// Where the state machine is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ExtractingFacts,
    Structuring,
    Summarizing,
    Validating,
    Done,
    Aborted,
}

/// The intermediate artifacts a run produced before it ended.
#[derive(Debug, Clone, Default)]
pub struct RunArtifacts {
    pub facts: Option<FactSet>,
    pub outline: Option<Outline>,
    pub summary: Option<Summary>,
}

/// The stage failure that aborted a run.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: &'static str,
    pub error: StageError,
}

/// Everything a run produced: final state, artifacts, report, and trace.
#[derive(Debug)]
pub struct RunOutcome {
    pub state: PipelineState,
    pub artifacts: RunArtifacts,

    /// Absent only when the run was cancelled before the validator could
    /// say anything at all
    pub report: Option<ValidationReport>,

    pub trace: Trace,
    pub failure: Option<StageFailure>,
}

impl RunOutcome {
    /// Whether the run completed and validation passed.
    pub fn passed(&self) -> bool {
        self.state == PipelineState::Done
            && self.report.as_ref().is_some_and(ValidationReport::passed)
    }

    /// Process exit code: 0 pass, 1 validation failure, 2 aborted.
    pub fn exit_code(&self) -> u8 {
        if self.state != PipelineState::Done {
            return 2;
        }
        match &self.report {
            Some(report) if report.passed() => 0,
            Some(_) => 1,
            None => 2,
        }
    }
}

/// The document pipeline: extract, structure, summarize, validate.
pub struct Pipeline<C: Collaborator> {
    collaborator: C,
    config: PipelineConfig,
}

impl<C: Collaborator> Pipeline<C> {
    /// Create a pipeline with the default configuration.
    pub fn new(collaborator: C) -> Self {
        Self {
            collaborator,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over a document.
    pub async fn run(&self, raw_text: &str) -> RunOutcome {
        self.run_with_cancel(raw_text, CancellationToken::new()).await
    }

    /// Run the full pipeline, abandoning the run when the token fires.
    pub async fn run_with_cancel(&self, raw_text: &str, cancel: CancellationToken) -> RunOutcome {
        let mut trace = Trace::new();
        let mut artifacts = RunArtifacts::default();
        debug!(run_id = %trace.run_id, "starting pipeline run");

        // Extraction. If it fails the validator still runs below, reporting
        // over whatever exists.
        let extract_failure = {
            let stage = FactExtractor::new(&self.collaborator, &self.config);
            let input = StageInput::from_text(raw_text);
            let input_ids = vec![doc_content_id(raw_text)];
            match self.execute(&stage, input, input_ids, &mut trace, &cancel).await {
                Ok(artifact) => {
                    artifacts.facts = artifact.into_facts();
                    None
                }
                Err(StageError::Cancelled) => {
                    return self.cancelled("extractor", artifacts, trace);
                }
                Err(error) => Some(StageFailure {
                    stage: "extractor",
                    error,
                }),
            }
        };

        if extract_failure.is_none() {
            // Structuring.
            let stage = Structurer::new(&self.collaborator);
            let mut input = StageInput::from_text(raw_text);
            input.facts = artifacts.facts.as_ref();
            let input_ids = artifact_ids(&artifacts);
            match self.execute(&stage, input, input_ids, &mut trace, &cancel).await {
                Ok(artifact) => artifacts.outline = artifact.into_outline(),
                Err(StageError::Cancelled) => {
                    return self.cancelled("structurer", artifacts, trace);
                }
                Err(error) => return self.aborted("structurer", error, artifacts, trace),
            }

            // Summarizing.
            let stage = Summarizer::new(&self.collaborator);
            let mut input = StageInput::from_text(raw_text);
            input.facts = artifacts.facts.as_ref();
            input.outline = artifacts.outline.as_ref();
            let input_ids = artifact_ids(&artifacts);
            match self.execute(&stage, input, input_ids, &mut trace, &cancel).await {
                Ok(artifact) => artifacts.summary = artifact.into_summary(),
                Err(StageError::Cancelled) => {
                    return self.cancelled("summarizer", artifacts, trace);
                }
                Err(error) => return self.aborted("summarizer", error, artifacts, trace),
            }
        }

        // Validation runs over whatever exists.
        let mut input = StageInput::from_text(raw_text);
        input.facts = artifacts.facts.as_ref();
        input.outline = artifacts.outline.as_ref();
        input.summary = artifacts.summary.as_ref();
        let input_ids = artifact_ids(&artifacts);
        let report = match self.execute(&Validator, input, input_ids, &mut trace, &cancel).await {
            Ok(artifact) => artifact.into_report(),
            Err(StageError::Cancelled) => {
                return self.cancelled("validator", artifacts, trace);
            }
            Err(error) => return self.aborted("validator", error, artifacts, trace),
        };

        match extract_failure {
            Some(failure) => {
                warn!(stage = failure.stage, error = %failure.error, "run aborted");
                RunOutcome {
                    state: PipelineState::Aborted,
                    artifacts,
                    report,
                    trace,
                    failure: Some(failure),
                }
            }
            None => {
                debug!("pipeline run complete");
                RunOutcome {
                    state: PipelineState::Done,
                    artifacts,
                    report,
                    trace,
                    failure: None,
                }
            }
        }
    }

    /// Run one stage with timeout, cancellation, and schema validation,
    /// recording exactly one trace event for the invocation.
    async fn execute(
        &self,
        stage: &dyn Stage,
        input: StageInput<'_>,
        input_ids: Vec<String>,
        trace: &mut Trace,
        cancel: &CancellationToken,
    ) -> Result<Artifact, StageError> {
        debug!(stage = stage.name(), "running stage");
        let started_at = Utc::now();

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StageError::Cancelled),
            timed = tokio::time::timeout(self.config.stage_timeout(), stage.run(input)) => {
                match timed {
                    Ok(result) => result,
                    Err(_) => Err(StageError::Timeout {
                        seconds: self.config.stage_timeout_secs,
                    }),
                }
            }
        };

        let result = result.and_then(|artifact| {
            if artifact.kind() != stage.output_kind() {
                return Err(StageError::MalformedResponse {
                    reason: format!(
                        "stage {} produced a {} artifact, expected {}",
                        stage.name(),
                        artifact.kind(),
                        stage.output_kind()
                    ),
                });
            }
            schema::validate(&artifact)?;
            Ok(artifact)
        });

        let ended_at = Utc::now();
        match &result {
            Ok(artifact) => trace.record(TraceEvent::ok(
                stage.name(),
                started_at,
                ended_at,
                input_ids,
                artifact.content_id(),
            )),
            Err(error) => trace.record(TraceEvent::failed(
                stage.name(),
                started_at,
                ended_at,
                input_ids,
                error.to_string(),
            )),
        }

        result
    }

    /// Abort after a structurer, summarizer, or validator failure: the
    /// validator is not (re)invoked, the report names the failed stage.
    fn aborted(
        &self,
        stage: &'static str,
        error: StageError,
        artifacts: RunArtifacts,
        trace: Trace,
    ) -> RunOutcome {
        warn!(stage, error = %error, "run aborted");
        let report = ValidationReport::aborted(
            stage,
            artifacts.facts.as_ref().map_or(0, FactSet::len),
            artifacts.outline.as_ref().map_or(0, Outline::node_count),
            artifacts.summary.as_ref().map_or(0, |s| s.segments.len()),
        );
        RunOutcome {
            state: PipelineState::Aborted,
            artifacts,
            report: Some(report),
            trace,
            failure: Some(StageFailure { stage, error }),
        }
    }

    fn cancelled(
        &self,
        stage: &'static str,
        artifacts: RunArtifacts,
        trace: Trace,
    ) -> RunOutcome {
        warn!(stage, "run cancelled");
        RunOutcome {
            state: PipelineState::Aborted,
            artifacts,
            report: None,
            trace,
            failure: Some(StageFailure {
                stage,
                error: StageError::Cancelled,
            }),
        }
    }
}

/// Content ids of the artifacts produced so far, in pipeline order.
fn artifact_ids(artifacts: &RunArtifacts) -> Vec<String> {
    let mut ids = Vec::new();
    if let Some(facts) = &artifacts.facts {
        ids.push(Artifact::Facts(facts.clone()).content_id());
    }
    if let Some(outline) = &artifacts.outline {
        ids.push(Artifact::Outline(outline.clone()).content_id());
    }
    if let Some(summary) = &artifacts.summary {
        ids.push(Artifact::Summary(summary.clone()).content_id());
    }
    ids
}
