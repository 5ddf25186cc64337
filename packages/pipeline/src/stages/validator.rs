//! Cross-artifact validation stage.
//!
//! The consistency and hallucination checker. It verifies referential
//! integrity across the fact set, outline, and summary, and flags claims
//! in the summary with no traceable support in the facts.
//!
//! The contradiction scan is deliberately conservative: it only flags
//! direct numeric conflicts (identical statements up to the numbers) and
//! direct negation pairs. False negatives are acceptable, false positives
//! are not; a validator that cries wolf stops being read.

use std::collections::HashSet;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::error::StageResult;
use crate::traits::stage::{Stage, StageInput};
use crate::types::artifact::{Artifact, ArtifactKind};
use crate::types::fact::{Fact, FactSet};
use crate::types::outline::Outline;
use crate::types::report::{IssueCategory, ValidationIssue, ValidationReport};
use crate::types::summary::Summary;

/// Run every validation check and assemble the report.
///
/// Deterministic: identical artifacts always yield an identical report,
/// issues included, in the same order.
pub fn validate_artifacts(facts: &FactSet, outline: &Outline, summary: &Summary) -> ValidationReport {
    let mut issues = Vec::new();

    check_dangling_references(&mut issues, facts, outline, summary);
    check_orphaned_facts(&mut issues, facts, outline);
    check_unsupported_claims(&mut issues, facts, outline, summary);
    check_contradictions(&mut issues, facts, outline, summary);
    check_coverage(&mut issues, outline, summary);

    debug!(issues = issues.len(), "validation complete");
    ValidationReport::from_issues(
        issues,
        facts.len(),
        outline.node_count(),
        summary.segments.len(),
    )
}

/// Check 1: every cited id must exist in the artifact it points at.
///
/// Exactly one error per missing id, located at its first citation site.
fn check_dangling_references(
    issues: &mut Vec<ValidationIssue>,
    facts: &FactSet,
    outline: &Outline,
    summary: &Summary,
) {
    let mut reported: HashSet<&str> = HashSet::new();

    for node in outline.walk() {
        for fact_id in &node.fact_ids {
            if !facts.contains_id(fact_id) && reported.insert(fact_id) {
                issues.push(ValidationIssue::error(
                    IssueCategory::DanglingReference,
                    format!("outline node \"{}\"", node.id),
                    format!("cites unknown fact id \"{fact_id}\""),
                ));
            }
        }
    }

    let mut reported: HashSet<&str> = HashSet::new();
    for (i, segment) in summary.segments.iter().enumerate() {
        for node_id in &segment.supporting_outline_ids {
            if !outline.contains_id(node_id) && reported.insert(node_id) {
                issues.push(ValidationIssue::error(
                    IssueCategory::DanglingReference,
                    format!("summary segment {}", i + 1),
                    format!("cites unknown outline node id \"{node_id}\""),
                ));
            }
        }
    }
}

/// Check 2: every fact should be cited by at least one outline node.
///
/// An extracted-but-unused fact is wasteful rather than harmful, so this
/// is a warning.
fn check_orphaned_facts(issues: &mut Vec<ValidationIssue>, facts: &FactSet, outline: &Outline) {
    let cited: HashSet<&str> = outline
        .walk()
        .into_iter()
        .flat_map(|n| n.fact_ids.iter().map(String::as_str))
        .collect();

    for fact in &facts.facts {
        if !cited.contains(fact.id.as_str()) {
            issues.push(ValidationIssue::warning(
                IssueCategory::MissingSource,
                format!("fact \"{}\"", fact.id),
                "extracted but never cited by any outline node",
            ));
        }
    }
}

/// Check 3: the hallucination detector. At most one error per segment.
///
/// A segment is unsupported when it cites nothing, when nothing it cites
/// actually traces back to facts, or when part of its text shares no
/// content words with the facts behind its cited nodes.
fn check_unsupported_claims(
    issues: &mut Vec<ValidationIssue>,
    facts: &FactSet,
    outline: &Outline,
    summary: &Summary,
) {
    for (i, segment) in summary.segments.iter().enumerate() {
        let location = format!("summary segment {}", i + 1);

        if segment.supporting_outline_ids.is_empty() {
            issues.push(ValidationIssue::error(
                IssueCategory::UnsupportedClaim,
                location,
                "declares no supporting outline references",
            ));
            continue;
        }

        // Facts reachable through the segment's cited nodes.
        let mut supported = false;
        let mut supporting_facts: Vec<&Fact> = Vec::new();
        for node_id in &segment.supporting_outline_ids {
            let Some(node) = outline.get(node_id) else {
                continue;
            };
            for fact_id in node.transitive_fact_ids() {
                if let Some(fact) = facts.get(fact_id) {
                    supported = true;
                    if !supporting_facts.iter().any(|f| f.id == fact.id) {
                        supporting_facts.push(fact);
                    }
                }
            }
        }

        if !supported {
            issues.push(ValidationIssue::error(
                IssueCategory::UnsupportedClaim,
                location,
                "none of its cited outline nodes trace back to any fact",
            ));
            continue;
        }

        // Lexical grounding: every clause of the segment must share at
        // least one content word with the supporting facts.
        let mut fact_words: HashSet<String> = HashSet::new();
        for fact in &supporting_facts {
            fact_words.extend(content_words(&fact.statement));
            fact_words.extend(content_words(&fact.source_reference));
        }

        for clause in split_clauses(&segment.text) {
            let words = content_words(clause);
            if words.len() < 2 {
                continue;
            }
            if words.iter().all(|w| !fact_words.contains(w)) {
                issues.push(ValidationIssue::error(
                    IssueCategory::UnsupportedClaim,
                    location,
                    format!("claim \"{}\" has no traceable support in the cited facts", clause.trim()),
                ));
                break;
            }
        }
    }
}

/// Check 4: conservative contradiction scan.
///
/// Two passes over the same heuristics: facts cited by the same node
/// against each other, then each summary segment's clauses against the
/// facts behind its cited nodes.
fn check_contradictions(
    issues: &mut Vec<ValidationIssue>,
    facts: &FactSet,
    outline: &Outline,
    summary: &Summary,
) {
    let mut reported: HashSet<(String, String)> = HashSet::new();

    for node in outline.walk() {
        let cited: Vec<&Fact> = node
            .fact_ids
            .iter()
            .filter_map(|id| facts.get(id))
            .collect();

        for (a_idx, a) in cited.iter().enumerate() {
            for b in cited.iter().skip(a_idx + 1) {
                let pair = if a.id <= b.id {
                    (a.id.clone(), b.id.clone())
                } else {
                    (b.id.clone(), a.id.clone())
                };
                if reported.contains(&pair) {
                    continue;
                }

                if let Some(reason) = direct_conflict(&a.statement, &b.statement) {
                    reported.insert(pair);
                    issues.push(ValidationIssue::error(
                        IssueCategory::Contradiction,
                        format!("outline node \"{}\"", node.id),
                        format!(
                            "facts \"{}\" and \"{}\" conflict: {reason}",
                            a.id, b.id
                        ),
                    ));
                }
            }
        }
    }

    for (i, segment) in summary.segments.iter().enumerate() {
        let mut reported_facts: HashSet<&str> = HashSet::new();

        for node_id in &segment.supporting_outline_ids {
            let Some(node) = outline.get(node_id) else {
                continue;
            };
            for fact_id in node.transitive_fact_ids() {
                let Some(fact) = facts.get(fact_id) else {
                    continue;
                };
                if reported_facts.contains(fact.id.as_str()) {
                    continue;
                }
                for clause in split_clauses(&segment.text) {
                    if let Some(reason) = direct_conflict(clause, &fact.statement) {
                        reported_facts.insert(&fact.id);
                        issues.push(ValidationIssue::error(
                            IssueCategory::Contradiction,
                            format!("summary segment {}", i + 1),
                            format!(
                                "claim \"{}\" conflicts with fact \"{}\": {reason}",
                                clause.trim(),
                                fact.id
                            ),
                        ));
                        break;
                    }
                }
            }
        }
    }
}

/// Check 5: coverage. Every fact-bearing node should back some segment.
fn check_coverage(issues: &mut Vec<ValidationIssue>, outline: &Outline, summary: &Summary) {
    if summary.segments.is_empty() && outline.nodes.is_empty() {
        return;
    }
    let cited = summary.supporting_ids();

    for node_id in outline.fact_bearing_ids() {
        if !cited.contains(node_id) {
            issues.push(ValidationIssue::warning(
                IssueCategory::MissingSource,
                format!("outline node \"{node_id}\""),
                "carries facts but is not cited by any summary segment",
            ));
        }
    }
}

// === Conflict heuristics ===

/// Detect a direct conflict between two statements.
///
/// Two forms only: a numeric conflict (identical up to the numbers, with
/// differing numbers) and a negation conflict (identical once negation is
/// stripped, with negation on exactly one side).
fn direct_conflict(a: &str, b: &str) -> Option<&'static str> {
    if numeric_conflict(a, b) {
        return Some("same statement with different numbers");
    }
    if negation_conflict(a, b) {
        return Some("one directly negates the other");
    }
    None
}

fn numeric_conflict(a: &str, b: &str) -> bool {
    let (shape_a, nums_a) = number_shape(a);
    let (shape_b, nums_b) = number_shape(b);
    !nums_a.is_empty() && shape_a == shape_b && nums_a != nums_b
}

/// Statement with each number masked, plus the numbers in order.
fn number_shape(s: &str) -> (String, Vec<String>) {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?%?").unwrap());

    let lowered = s.to_lowercase();
    let mut numbers = Vec::new();
    let masked = re.replace_all(&lowered, |caps: &regex::Captures<'_>| {
        numbers.push(caps[0].to_string());
        "#"
    });
    (normalize_words(&masked).join(" "), numbers)
}

fn negation_conflict(a: &str, b: &str) -> bool {
    let (stripped_a, negated_a) = strip_negation(a);
    let (stripped_b, negated_b) = strip_negation(b);
    !stripped_a.is_empty() && stripped_a == stripped_b && negated_a != negated_b
}

/// Statement words with negation tokens removed, and whether any were.
fn strip_negation(s: &str) -> (Vec<String>, bool) {
    let mut negated = false;
    let words = normalize_words(s)
        .into_iter()
        .filter(|w| {
            let neg = matches!(w.as_str(), "not" | "no" | "never") || w.ends_with("n't");
            if neg {
                negated = true;
            }
            !neg
        })
        .collect();
    (words, negated)
}

fn normalize_words(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '#' && c != '%' && c != '.')
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_matches('.').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

// === Lexical grounding helpers ===

/// Split summary text into independently assessable clauses.
fn split_clauses(text: &str) -> Vec<&str> {
    text.split(['.', ';'])
        .flat_map(|s| s.split(" and "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercased content words: four letters or longer, minus function words.
fn content_words(text: &str) -> HashSet<String> {
    const STOPWORDS: &[&str] = &[
        "that", "this", "with", "from", "have", "been", "were", "their", "which", "about",
        "would", "there", "other", "than", "then", "them", "these", "those", "also", "into",
        "over", "more", "most", "some", "such", "only", "very", "while", "during", "after",
        "before", "under", "between", "where", "when", "what", "because", "however",
    ];

    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '%')
        .filter(|w| w.len() >= 4 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// The validator as a pipeline stage.
///
/// Unlike the generative stages it tolerates absent inputs, treating each
/// missing artifact as empty, so it can still report on a partial run.
pub struct Validator;

#[async_trait]
impl Stage for Validator {
    fn name(&self) -> &'static str {
        "validator"
    }

    fn input_kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Facts, ArtifactKind::Outline, ArtifactKind::Summary]
    }

    fn output_kind(&self) -> ArtifactKind {
        ArtifactKind::Report
    }

    async fn run(&self, input: StageInput<'_>) -> StageResult<Artifact> {
        let empty_facts = FactSet::new();
        let empty_outline = Outline::new();
        let empty_summary = Summary::new();

        let facts = input.facts.unwrap_or(&empty_facts);
        let outline = input.outline.unwrap_or(&empty_outline);
        let summary = input.summary.unwrap_or(&empty_summary);

        Ok(Artifact::Report(validate_artifacts(facts, outline, summary)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::outline::OutlineNode;
    use crate::types::report::{OverallStatus, Severity};
    use crate::types::summary::SummarySegment;

    fn grounded_run() -> (FactSet, Outline, Summary) {
        let facts = FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance").with_fact("f1")],
        };
        let summary = Summary {
            segments: vec![SummarySegment::new("Revenue grew 10% last quarter.").with_support("n1")],
        };
        (facts, outline, summary)
    }

    #[test]
    fn test_grounded_run_passes() {
        let (facts, outline, summary) = grounded_run();
        let report = validate_artifacts(&facts, &outline, &summary);
        assert!(report.passed());
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_empty_artifacts_pass_vacuously() {
        let report = validate_artifacts(&FactSet::new(), &Outline::new(), &Summary::new());
        assert_eq!(report.overall_status, OverallStatus::Pass);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_dangling_fact_reference_one_error_per_missing_id() {
        let facts = FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        };
        // f9 is cited twice but must be reported once.
        let outline = Outline {
            nodes: vec![
                OutlineNode::new("n1", "A").with_fact("f1").with_fact("f9"),
                OutlineNode::new("n2", "B").with_fact("f9"),
            ],
        };
        let report = validate_artifacts(&facts, &outline, &Summary::new());

        let dangling: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.category == IssueCategory::DanglingReference)
            .collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].location, "outline node \"n1\"");
        assert!(dangling[0].message.contains("f9"));
    }

    #[test]
    fn test_dangling_outline_reference_in_summary() {
        let (facts, outline, _) = grounded_run();
        let summary = Summary {
            segments: vec![SummarySegment::new("Revenue grew 10%.").with_support("n7")],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        assert!(report.issues.iter().any(|i| {
            i.category == IssueCategory::DanglingReference && i.message.contains("n7")
        }));
        assert_eq!(report.overall_status, OverallStatus::Fail);
    }

    #[test]
    fn test_orphaned_fact_is_warning() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Refunds spiked in week 6", "refunds spiked around week 6"),
            ],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance").with_fact("f1")],
        };
        let summary = Summary {
            segments: vec![SummarySegment::new("Revenue grew 10%.").with_support("n1")],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        let orphans: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Warning && i.location == "fact \"f2\"")
            .collect();
        assert_eq!(orphans.len(), 1);
        // Warnings alone never fail a run.
        assert_eq!(report.overall_status, OverallStatus::Pass);
    }

    #[test]
    fn test_segment_without_support_is_unsupported_claim() {
        let (facts, outline, _) = grounded_run();
        let summary = Summary {
            segments: vec![SummarySegment::new("Profit doubled.")],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        assert!(report.issues.iter().any(|i| {
            i.category == IssueCategory::UnsupportedClaim && i.severity == Severity::Error
        }));
        assert_eq!(report.overall_status, OverallStatus::Fail);
    }

    #[test]
    fn test_added_claim_beyond_cited_facts_flagged_once() {
        // The segment cites a real, supported node but smuggles in a claim
        // no fact backs.
        let (facts, outline, _) = grounded_run();
        let summary = Summary {
            segments: vec![
                SummarySegment::new("Revenue grew 10% and profit doubled.").with_support("n1"),
            ],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        let unsupported: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.category == IssueCategory::UnsupportedClaim)
            .collect();
        assert_eq!(unsupported.len(), 1);
        assert_eq!(unsupported[0].severity, Severity::Error);
        assert_eq!(unsupported[0].location, "summary segment 1");
        assert_eq!(report.overall_status, OverallStatus::Fail);
    }

    #[test]
    fn test_segment_citing_only_dangling_nodes_is_unsupported() {
        let facts = FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance").with_fact("f1")],
        };
        // n2 does not exist; the segment has no real support left.
        let summary = Summary {
            segments: vec![SummarySegment::new("Margins improved sharply.").with_support("n2")],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        assert!(report.issues.iter().any(|i| {
            i.category == IssueCategory::UnsupportedClaim
                && i.message.contains("trace back to any fact")
        }));
    }

    #[test]
    fn test_numeric_contradiction_detected() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Revenue grew 12%", "revenue grew by 12%"),
            ],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance")
                .with_fact("f1")
                .with_fact("f2")],
        };
        let report = validate_artifacts(&facts, &outline, &Summary::new());

        let conflicts: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.category == IssueCategory::Contradiction)
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].message.contains("f1"));
        assert!(conflicts[0].message.contains("f2"));
    }

    #[test]
    fn test_negation_contradiction_detected() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "The churn target was met", "the churn target was met"),
                Fact::new("f2", "The churn target was not met", "the churn target was not met"),
            ],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Churn").with_fact("f1").with_fact("f2")],
        };
        let report = validate_artifacts(&facts, &outline, &Summary::new());

        assert!(report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Contradiction));
    }

    #[test]
    fn test_segment_with_conflicting_number_contradicts_its_fact() {
        // The segment cites the right node but misstates the figure.
        let (facts, outline, _) = grounded_run();
        let summary = Summary {
            segments: vec![SummarySegment::new("Revenue grew 12%.").with_support("n1")],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        let conflicts: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.category == IssueCategory::Contradiction)
            .collect();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].location, "summary segment 1");
        assert!(conflicts[0].message.contains("f1"));
        assert_eq!(report.overall_status, OverallStatus::Fail);
    }

    #[test]
    fn test_segment_negating_its_fact_contradicts() {
        let facts = FactSet {
            facts: vec![Fact::new("f1", "The churn target was met", "the churn target was met")],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Churn").with_fact("f1")],
        };
        let summary = Summary {
            segments: vec![
                SummarySegment::new("The churn target was not met.").with_support("n1"),
            ],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        assert!(report.issues.iter().any(|i| {
            i.category == IssueCategory::Contradiction && i.location == "summary segment 1"
        }));
        assert!(!report.passed());
    }

    #[test]
    fn test_segment_restating_its_fact_does_not_conflict() {
        let (facts, outline, summary) = grounded_run();
        let report = validate_artifacts(&facts, &outline, &summary);

        assert!(!report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Contradiction));
    }

    #[test]
    fn test_unrelated_facts_do_not_conflict() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Headcount reached 120", "headcount reached 120"),
            ],
        };
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance")
                .with_fact("f1")
                .with_fact("f2")],
        };
        let report = validate_artifacts(&facts, &outline, &Summary::new());

        assert!(!report
            .issues
            .iter()
            .any(|i| i.category == IssueCategory::Contradiction));
    }

    #[test]
    fn test_conflict_pair_reported_once_across_nodes() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Revenue grew 12%", "revenue grew by 12%"),
            ],
        };
        // Both nodes cite the same conflicting pair.
        let outline = Outline {
            nodes: vec![
                OutlineNode::new("n1", "A").with_fact("f1").with_fact("f2"),
                OutlineNode::new("n2", "B").with_fact("f1").with_fact("f2"),
            ],
        };
        let report = validate_artifacts(&facts, &outline, &Summary::new());

        let conflicts = report
            .issues
            .iter()
            .filter(|i| i.category == IssueCategory::Contradiction)
            .count();
        assert_eq!(conflicts, 1);
    }

    #[test]
    fn test_uncovered_fact_bearing_node_is_warning() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Refunds spiked in week 6", "refunds spiked around week 6"),
            ],
        };
        let outline = Outline {
            nodes: vec![
                OutlineNode::new("n1", "Performance").with_fact("f1"),
                OutlineNode::new("n2", "Refunds").with_fact("f2"),
            ],
        };
        let summary = Summary {
            segments: vec![SummarySegment::new("Revenue grew 10%.").with_support("n1")],
        };
        let report = validate_artifacts(&facts, &outline, &summary);

        assert!(report.issues.iter().any(|i| {
            i.severity == Severity::Warning && i.location == "outline node \"n2\""
        }));
    }

    #[test]
    fn test_report_is_deterministic() {
        let (facts, outline, _) = grounded_run();
        let summary = Summary {
            segments: vec![
                SummarySegment::new("Revenue grew 10% and profit doubled.").with_support("n1"),
            ],
        };

        let first = validate_artifacts(&facts, &outline, &summary);
        let second = validate_artifacts(&facts, &outline, &summary);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_stage_tolerates_missing_inputs() {
        let artifact = Validator.run(StageInput::from_text("")).await.unwrap();
        let report = artifact.into_report().unwrap();
        assert!(report.passed());
    }

    #[test]
    fn test_number_shape_masks_numbers() {
        let (shape_a, nums_a) = number_shape("Revenue grew 10%");
        let (shape_b, nums_b) = number_shape("Revenue grew 12%");
        assert_eq!(shape_a, shape_b);
        assert_eq!(nums_a, vec!["10%"]);
        assert_eq!(nums_b, vec!["12%"]);
    }

    #[test]
    fn test_split_clauses() {
        let clauses = split_clauses("Revenue grew 10% and profit doubled. Churn fell.");
        assert_eq!(clauses, vec!["Revenue grew 10%", "profit doubled", "Churn fell"]);
    }
}
