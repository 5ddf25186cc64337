//! Trace types - the append-only audit log of stage executions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one stage invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Ok,
    Failed,
}

/// One stage invocation: what ran, when, on which artifacts, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub stage_name: String,

    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,

    /// Content ids of the artifacts handed to the stage
    pub input_artifact_ids: Vec<String>,

    /// Content id of the artifact the stage produced (absent on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_artifact_id: Option<String>,

    pub status: StageStatus,

    /// Failure reason, present only for failed events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TraceEvent {
    /// Record a successful stage invocation.
    pub fn ok(
        stage_name: impl Into<String>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        input_artifact_ids: Vec<String>,
        output_artifact_id: impl Into<String>,
    ) -> Self {
        Self {
            stage_name: stage_name.into(),
            started_at,
            ended_at,
            input_artifact_ids,
            output_artifact_id: Some(output_artifact_id.into()),
            status: StageStatus::Ok,
            error: None,
        }
    }

    /// Record a failed stage invocation.
    pub fn failed(
        stage_name: impl Into<String>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        input_artifact_ids: Vec<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            stage_name: stage_name.into(),
            started_at,
            ended_at,
            input_artifact_ids,
            output_artifact_id: None,
            status: StageStatus::Failed,
            error: Some(error.into()),
        }
    }
}

/// The execution trace: one event per stage invocation, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Identifier for this run
    pub run_id: Uuid,

    /// Events in invocation order
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Start a fresh trace for a new run.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            events: Vec::new(),
        }
    }

    /// Append an event. Events are never removed or rewritten.
    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no stage has run yet.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}
