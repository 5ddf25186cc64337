//! Validation report types - the findings of the cross-artifact validator.

use serde::{Deserialize, Serialize};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The run cannot be trusted; fails the report
    Error,

    /// Worth attention but does not fail the report
    Warning,
}

/// What kind of defect a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// A claim with no traceable support in an earlier artifact
    UnsupportedClaim,

    /// A cited identifier that does not exist upstream
    DanglingReference,

    /// Two statements that directly conflict
    Contradiction,

    /// Source material missing or unused (orphaned facts, uncovered
    /// nodes, incomplete runs)
    MissingSource,
}

/// Pass/fail outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Fail,
}

/// A single finding from the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub category: IssueCategory,

    /// Where the defect lives (e.g. `summary segment 2`, `outline node n3`)
    pub location: String,

    /// Human-readable explanation
    pub message: String,
}

impl ValidationIssue {
    /// Create an error-severity issue.
    pub fn error(
        category: IssueCategory,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            category,
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a warning-severity issue.
    pub fn warning(
        category: IssueCategory,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            location: location.into(),
            message: message.into(),
        }
    }
}

/// The validation artifact: every finding plus run-level counts.
///
/// `overall_status` is `Fail` iff at least one issue has `Error` severity.
/// Validation findings never abort a run; they are always collected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings in check order (deterministic for identical inputs)
    pub issues: Vec<ValidationIssue>,

    pub fact_count: usize,
    pub outline_node_count: usize,
    pub summary_segment_count: usize,

    pub overall_status: OverallStatus,
}

impl ValidationReport {
    /// Build a report from collected issues, deriving the overall status.
    pub fn from_issues(
        issues: Vec<ValidationIssue>,
        fact_count: usize,
        outline_node_count: usize,
        summary_segment_count: usize,
    ) -> Self {
        let overall_status = if issues.iter().any(|i| i.severity == Severity::Error) {
            OverallStatus::Fail
        } else {
            OverallStatus::Pass
        };

        Self {
            issues,
            fact_count,
            outline_node_count,
            summary_segment_count,
            overall_status,
        }
    }

    /// Report for a run that aborted before the validator could cross-check
    /// anything: a single error-severity `MissingSource` finding naming the
    /// stage that stopped the run.
    pub fn aborted(
        stage_name: &str,
        fact_count: usize,
        outline_node_count: usize,
        summary_segment_count: usize,
    ) -> Self {
        let issue = ValidationIssue::error(
            IssueCategory::MissingSource,
            stage_name,
            format!("run did not complete: the {stage_name} stage aborted"),
        );
        Self::from_issues(
            vec![issue],
            fact_count,
            outline_node_count,
            summary_segment_count,
        )
    }

    /// Whether the report passed.
    pub fn passed(&self) -> bool {
        self.overall_status == OverallStatus::Pass
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_fails_only_on_errors() {
        let warn_only = ValidationReport::from_issues(
            vec![ValidationIssue::warning(
                IssueCategory::MissingSource,
                "fact f3",
                "fact f3 is never cited by any outline node",
            )],
            3,
            2,
            1,
        );
        assert!(warn_only.passed());
        assert_eq!(warn_only.warning_count(), 1);

        let with_error = ValidationReport::from_issues(
            vec![ValidationIssue::error(
                IssueCategory::DanglingReference,
                "outline node n1",
                "cites unknown fact id \"f9\"",
            )],
            3,
            2,
            1,
        );
        assert!(!with_error.passed());
        assert_eq!(with_error.error_count(), 1);
    }

    #[test]
    fn test_aborted_report_is_failing() {
        let report = ValidationReport::aborted("structurer", 4, 0, 0);
        assert!(!report.passed());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].category, IssueCategory::MissingSource);
        assert_eq!(report.fact_count, 4);
    }

    #[test]
    fn test_serde_round_trip() {
        let report = ValidationReport::from_issues(
            vec![ValidationIssue::error(
                IssueCategory::UnsupportedClaim,
                "summary segment 1",
                "no supporting outline nodes",
            )],
            1,
            1,
            1,
        );

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, parsed);
    }
}
