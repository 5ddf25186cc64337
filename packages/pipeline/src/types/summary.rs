//! Summary types - the prose summary generated from the outline.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One segment of summary prose.
///
/// Every segment declares the outline nodes that support it. A segment with
/// no supporting ids is a candidate unsupported claim - that is the
/// validator's finding to make, not a schema failure, so the field may be
/// empty here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySegment {
    /// Summary prose
    pub text: String,

    /// Ids of the outline nodes this segment is traceable to
    #[serde(default)]
    pub supporting_outline_ids: IndexSet<String>,
}

impl SummarySegment {
    /// Create a new segment with no supporting nodes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            supporting_outline_ids: IndexSet::new(),
        }
    }

    /// Add a supporting outline node id.
    pub fn with_support(mut self, outline_id: impl Into<String>) -> Self {
        self.supporting_outline_ids.insert(outline_id.into());
        self
    }
}

/// The summary artifact: an ordered sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Segments in reading order
    pub segments: Vec<SummarySegment>,
}

impl Summary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the summary has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The full summary text: segment texts concatenated in order.
    ///
    /// This is exactly what `executive_summary.md` contains - no structural
    /// metadata, just the prose.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Union of supporting outline ids across all segments, in first-seen order.
    pub fn supporting_ids(&self) -> IndexSet<&str> {
        self.segments
            .iter()
            .flat_map(|s| s.supporting_outline_ids.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_concatenates_in_order() {
        let summary = Summary {
            segments: vec![
                SummarySegment::new("Revenue improved.").with_support("n1"),
                SummarySegment::new("Churn needs attention.").with_support("n2"),
            ],
        };

        assert_eq!(summary.text(), "Revenue improved.\n\nChurn needs attention.");
    }

    #[test]
    fn test_supporting_ids_union() {
        let summary = Summary {
            segments: vec![
                SummarySegment::new("A").with_support("n1").with_support("n2"),
                SummarySegment::new("B").with_support("n2"),
            ],
        };

        let ids: Vec<&str> = summary.supporting_ids().into_iter().collect();
        assert_eq!(ids, vec!["n1", "n2"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let summary = Summary {
            segments: vec![SummarySegment::new("Revenue improved.").with_support("n1")],
        };

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: Summary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, parsed);
    }
}
