//! Artifact Schema Layer - pure data-shape validation.
//!
//! Checks required fields, identifier uniqueness within an artifact, and
//! syntactic well-formedness of referential fields. It never checks whether
//! a cited id exists in another artifact; cross-artifact existence is the
//! validator's job.
//!
//! Two modes: [`validate`] fails fast with the first violation (what the
//! orchestrator uses between stages), [`check`] collects every violation
//! (what you want when debugging a misbehaving collaborator).

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::types::artifact::Artifact;
use crate::types::fact::FactSet;
use crate::types::outline::{Outline, OutlineNode};
use crate::types::report::{OverallStatus, Severity, ValidationReport};
use crate::types::summary::Summary;

/// Validate an artifact, failing on the first violation found.
pub fn validate(artifact: &Artifact) -> Result<(), SchemaError> {
    match check(artifact).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collect every schema violation in an artifact.
pub fn check(artifact: &Artifact) -> Vec<SchemaError> {
    match artifact {
        Artifact::Facts(facts) => check_facts(facts),
        Artifact::Outline(outline) => check_outline(outline),
        Artifact::Summary(summary) => check_summary(summary),
        Artifact::Report(report) => check_report(report),
    }
}

fn check_facts(facts: &FactSet) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, fact) in facts.facts.iter().enumerate() {
        check_identifier(&mut errors, &format!("facts[{i}].id"), &fact.id);
        if !seen.insert(&fact.id) {
            errors.push(SchemaError::new(
                format!("facts[{i}].id"),
                format!("duplicate fact id \"{}\"", fact.id),
            ));
        }
        if fact.statement.trim().is_empty() {
            errors.push(SchemaError::new(
                format!("facts[{i}].statement"),
                "must not be empty",
            ));
        }
        if fact.source_reference.trim().is_empty() {
            errors.push(SchemaError::new(
                format!("facts[{i}].source_reference"),
                "every fact must carry a source reference",
            ));
        }
    }

    errors
}

fn check_outline(outline: &Outline) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, node) in outline.nodes.iter().enumerate() {
        check_node(&mut errors, &mut seen, node, &format!("nodes[{i}]"));
    }

    errors
}

fn check_node<'a>(
    errors: &mut Vec<SchemaError>,
    seen: &mut HashSet<&'a str>,
    node: &'a OutlineNode,
    path: &str,
) {
    check_identifier(errors, &format!("{path}.id"), &node.id);
    if !seen.insert(&node.id) {
        errors.push(SchemaError::new(
            format!("{path}.id"),
            format!("duplicate outline node id \"{}\"", node.id),
        ));
    }
    if node.heading.trim().is_empty() {
        errors.push(SchemaError::new(format!("{path}.heading"), "must not be empty"));
    }
    for (j, fact_id) in node.fact_ids.iter().enumerate() {
        check_identifier(errors, &format!("{path}.fact_ids[{j}]"), fact_id);
    }

    // A node cites facts directly or has a descendant that does;
    // leaf nodes must cite facts.
    if !node.has_fact_support() {
        errors.push(SchemaError::new(
            format!("{path}.fact_ids"),
            format!(
                "outline node \"{}\" cites no facts and has no fact-bearing descendant",
                node.id
            ),
        ));
    }

    for (j, child) in node.children.iter().enumerate() {
        check_node(errors, seen, child, &format!("{path}.children[{j}]"));
    }
}

fn check_summary(summary: &Summary) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    for (i, segment) in summary.segments.iter().enumerate() {
        if segment.text.trim().is_empty() {
            errors.push(SchemaError::new(
                format!("segments[{i}].text"),
                "must not be empty",
            ));
        }
        // An empty supporting set is shape-valid; the validator flags it as
        // an unsupported claim. Only the ids themselves are checked here.
        for (j, id) in segment.supporting_outline_ids.iter().enumerate() {
            check_identifier(
                &mut errors,
                &format!("segments[{i}].supporting_outline_ids[{j}]"),
                id,
            );
        }
    }

    errors
}

fn check_report(report: &ValidationReport) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    for (i, issue) in report.issues.iter().enumerate() {
        if issue.location.trim().is_empty() {
            errors.push(SchemaError::new(
                format!("issues[{i}].location"),
                "must not be empty",
            ));
        }
        if issue.message.trim().is_empty() {
            errors.push(SchemaError::new(
                format!("issues[{i}].message"),
                "must not be empty",
            ));
        }
    }

    let has_error = report.issues.iter().any(|i| i.severity == Severity::Error);
    let expected = if has_error {
        OverallStatus::Fail
    } else {
        OverallStatus::Pass
    };
    if report.overall_status != expected {
        errors.push(SchemaError::new(
            "overall_status",
            "must be fail iff at least one error-severity issue exists",
        ));
    }

    errors
}

fn check_identifier(errors: &mut Vec<SchemaError>, field: &str, id: &str) {
    if id.is_empty() {
        errors.push(SchemaError::new(field, "identifier must not be empty"));
    } else if id.chars().any(char::is_whitespace) {
        errors.push(SchemaError::new(
            field,
            format!("identifier \"{id}\" must not contain whitespace"),
        ));
    }
}
