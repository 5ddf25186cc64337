//! Fact types - atomic, source-grounded statements.

use serde::{Deserialize, Serialize};

/// A single atomic fact extracted from the source document.
///
/// Every fact carries a `source_reference`: a quote (or close span) from the
/// original text that supports it. A fact without one is a defect, never
/// silently accepted - the schema layer rejects it before it travels
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Unique id within a run (assigned `f1..fN` in production order)
    pub id: String,

    /// The statement being made
    pub statement: String,

    /// Quote or span from the original document supporting the statement
    pub source_reference: String,
}

impl Fact {
    /// Create a new fact.
    pub fn new(
        id: impl Into<String>,
        statement: impl Into<String>,
        source_reference: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            statement: statement.into(),
            source_reference: source_reference.into(),
        }
    }
}

/// The fact artifact: the ordered set of facts produced by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSet {
    /// Facts in production order
    pub facts: Vec<Fact>,
}

impl FactSet {
    /// Create an empty fact set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the set is empty (valid for empty input documents).
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Look up a fact by id.
    pub fn get(&self, id: &str) -> Option<&Fact> {
        self.facts.iter().find(|f| f.id == id)
    }

    /// Whether a fact with this id exists.
    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over fact ids in production order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.facts.iter().map(|f| f.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let set = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Churn is highest in the EU", "churn is highest in the EU region"),
            ],
        };

        assert_eq!(set.len(), 2);
        assert!(set.contains_id("f2"));
        assert!(!set.contains_id("f3"));
        assert_eq!(set.get("f1").map(|f| f.statement.as_str()), Some("Revenue grew 10%"));
    }

    #[test]
    fn test_serde_round_trip() {
        let set = FactSet {
            facts: vec![Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%")],
        };

        let json = serde_json::to_string(&set).unwrap();
        let parsed: FactSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, parsed);
    }
}
