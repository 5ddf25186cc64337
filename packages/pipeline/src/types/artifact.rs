//! The artifact envelope: a tagged variant over everything a stage can emit.
//!
//! Stages are statically known implementations of one contract, selected by
//! pipeline position; the envelope exists so the orchestrator and schema
//! layer can handle any stage output uniformly.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::fact::FactSet;
use super::outline::Outline;
use super::report::ValidationReport;
use super::summary::Summary;

/// The kind of an artifact, as declared by stage contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Facts,
    Outline,
    Summary,
    Report,
    Trace,
}

impl ArtifactKind {
    /// Lowercase name, used as the prefix of content ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Facts => "facts",
            ArtifactKind::Outline => "outline",
            ArtifactKind::Summary => "summary",
            ArtifactKind::Report => "report",
            ArtifactKind::Trace => "trace",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage output.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Facts(FactSet),
    Outline(Outline),
    Summary(Summary),
    Report(ValidationReport),
}

impl Artifact {
    /// The kind of this artifact.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Facts(_) => ArtifactKind::Facts,
            Artifact::Outline(_) => ArtifactKind::Outline,
            Artifact::Summary(_) => ArtifactKind::Summary,
            Artifact::Report(_) => ArtifactKind::Report,
        }
    }

    /// Content-derived id, stable across runs for identical content.
    ///
    /// Identical artifacts hash to identical ids, which makes traces
    /// comparable between runs of the same document.
    pub fn content_id(&self) -> String {
        match self {
            Artifact::Facts(v) => content_id(ArtifactKind::Facts.as_str(), v),
            Artifact::Outline(v) => content_id(ArtifactKind::Outline.as_str(), v),
            Artifact::Summary(v) => content_id(ArtifactKind::Summary.as_str(), v),
            Artifact::Report(v) => content_id(ArtifactKind::Report.as_str(), v),
        }
    }

    /// Unwrap as a fact set.
    pub fn into_facts(self) -> Option<FactSet> {
        match self {
            Artifact::Facts(v) => Some(v),
            _ => None,
        }
    }

    /// Unwrap as an outline.
    pub fn into_outline(self) -> Option<Outline> {
        match self {
            Artifact::Outline(v) => Some(v),
            _ => None,
        }
    }

    /// Unwrap as a summary.
    pub fn into_summary(self) -> Option<Summary> {
        match self {
            Artifact::Summary(v) => Some(v),
            _ => None,
        }
    }

    /// Unwrap as a validation report.
    pub fn into_report(self) -> Option<ValidationReport> {
        match self {
            Artifact::Report(v) => Some(v),
            _ => None,
        }
    }
}

/// Content id for the raw input document.
pub fn doc_content_id(text: &str) -> String {
    hash_id("doc", text.as_bytes())
}

fn content_id<T: Serialize>(prefix: &str, value: &T) -> String {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    hash_id(prefix, &bytes)
}

fn hash_id(prefix: &str, bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let hex: String = digest.iter().take(6).map(|b| format!("{b:02x}")).collect();
    format!("{prefix}:{hex}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fact::Fact;

    #[test]
    fn test_content_id_is_deterministic() {
        let a = Artifact::Facts(FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        });
        let b = a.clone();

        assert_eq!(a.content_id(), b.content_id());
        assert!(a.content_id().starts_with("facts:"));
    }

    #[test]
    fn test_content_id_differs_on_content() {
        let a = Artifact::Facts(FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        });
        let b = Artifact::Facts(FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 12%", "revenue grew by 12%")],
        });

        assert_ne!(a.content_id(), b.content_id());
    }

    #[test]
    fn test_doc_content_id() {
        assert_eq!(doc_content_id("hello"), doc_content_id("hello"));
        assert_ne!(doc_content_id("hello"), doc_content_id("world"));
        assert!(doc_content_id("hello").starts_with("doc:"));
    }
}
