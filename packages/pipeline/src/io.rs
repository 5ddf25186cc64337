//! Writing run artifacts to disk.
//!
//! A completed (or aborted) run is persisted as up to five files in one
//! output directory. JSON artifacts are pretty-printed so they diff well;
//! the summary is written as plain Markdown prose.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::pipeline::runner::RunOutcome;

pub const FACTS_FILE: &str = "facts.json";
pub const OUTLINE_FILE: &str = "outline.json";
pub const SUMMARY_FILE: &str = "executive_summary.md";
pub const REPORT_FILE: &str = "validation_report.json";
pub const TRACE_FILE: &str = "trace.json";

/// Errors from persisting artifacts.
#[derive(Debug, Error)]
pub enum ArtifactIoError {
    #[error("artifact io failed: {0}")]
    Io(#[from] io::Error),

    #[error("artifact serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write every artifact the run produced into `dir`, creating it if needed.
///
/// Absent artifacts are skipped, not written as empty files; an aborted run
/// leaves exactly the files its completed stages earned, plus the report
/// and the trace. Returns the paths written, in write order.
pub fn write_artifacts(dir: &Path, outcome: &RunOutcome) -> Result<Vec<PathBuf>, ArtifactIoError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if let Some(facts) = &outcome.artifacts.facts {
        written.push(write_json(dir, FACTS_FILE, facts)?);
    }
    if let Some(outline) = &outcome.artifacts.outline {
        written.push(write_json(dir, OUTLINE_FILE, outline)?);
    }
    if let Some(summary) = &outcome.artifacts.summary {
        let path = dir.join(SUMMARY_FILE);
        fs::write(&path, summary.text())?;
        info!(path = %path.display(), "wrote artifact");
        written.push(path);
    }
    if let Some(report) = &outcome.report {
        written.push(write_json(dir, REPORT_FILE, report)?);
    }
    written.push(write_json(dir, TRACE_FILE, &outcome.trace)?);

    Ok(written)
}

fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, ArtifactIoError> {
    let path = dir.join(name);
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(&path, json)?;
    info!(path = %path.display(), "wrote artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::runner::{PipelineState, RunArtifacts};
    use crate::types::fact::{Fact, FactSet};
    use crate::types::outline::{Outline, OutlineNode};
    use crate::types::report::ValidationReport;
    use crate::types::summary::{Summary, SummarySegment};
    use crate::types::trace::Trace;

    fn completed_outcome() -> RunOutcome {
        let facts = FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance").with_fact("f1")],
        };
        let summary = Summary {
            segments: vec![
                SummarySegment::new("Revenue grew 10%.").with_support("n1"),
                SummarySegment::new("Revenue performance improved.").with_support("n1"),
            ],
        };
        let report = crate::stages::validator::validate_artifacts(&facts, &outline, &summary);

        RunOutcome {
            state: PipelineState::Done,
            artifacts: RunArtifacts {
                facts: Some(facts),
                outline: Some(outline),
                summary: Some(summary),
            },
            report: Some(report),
            trace: Trace::new(),
            failure: None,
        }
    }

    #[test]
    fn test_writes_all_five_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_artifacts(dir.path(), &completed_outcome()).unwrap();

        assert_eq!(written.len(), 5);
        for name in [FACTS_FILE, OUTLINE_FILE, SUMMARY_FILE, REPORT_FILE, TRACE_FILE] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn test_summary_is_segment_texts_joined() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), &completed_outcome()).unwrap();

        let text = fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        assert_eq!(text, "Revenue grew 10%.\n\nRevenue performance improved.");
    }

    #[test]
    fn test_json_artifacts_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), &completed_outcome()).unwrap();

        let facts: FactSet =
            serde_json::from_str(&fs::read_to_string(dir.path().join(FACTS_FILE)).unwrap()).unwrap();
        assert_eq!(facts.facts[0].id, "f1");

        let report: ValidationReport =
            serde_json::from_str(&fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap())
                .unwrap();
        assert!(report.passed());
    }

    #[test]
    fn test_aborted_run_skips_absent_artifacts() {
        let outcome = RunOutcome {
            state: PipelineState::Aborted,
            artifacts: RunArtifacts::default(),
            report: None,
            trace: Trace::new(),
            failure: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let written = write_artifacts(dir.path(), &outcome).unwrap();

        assert_eq!(written.len(), 1);
        assert!(dir.path().join(TRACE_FILE).exists());
        assert!(!dir.path().join(FACTS_FILE).exists());
    }
}
