//! Outline types - the hierarchical structure built over the fact set.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A node in the outline tree.
///
/// A node either cites facts directly (`fact_ids`) or has at least one
/// descendant that does; leaf nodes must cite facts. Child order is
/// semantically meaningful - it drives summary ordering downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Unique id within a run (assigned `n1..nN` depth-first)
    pub id: String,

    /// Section heading
    pub heading: String,

    /// Ids of the facts this node cites directly
    #[serde(default)]
    pub fact_ids: IndexSet<String>,

    /// Ordered child nodes
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a new node with no facts or children.
    pub fn new(id: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
            fact_ids: IndexSet::new(),
            children: Vec::new(),
        }
    }

    /// Add a cited fact id.
    pub fn with_fact(mut self, fact_id: impl Into<String>) -> Self {
        self.fact_ids.insert(fact_id.into());
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: OutlineNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this node cites facts directly or through a descendant.
    pub fn has_fact_support(&self) -> bool {
        !self.fact_ids.is_empty() || self.children.iter().any(OutlineNode::has_fact_support)
    }

    /// Fact ids cited by this node and all of its descendants,
    /// in depth-first order.
    pub fn transitive_fact_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.fact_ids.iter().map(String::as_str).collect();
        for child in &self.children {
            ids.extend(child.transitive_fact_ids());
        }
        ids
    }
}

/// The outline artifact: a rooted forest of outline nodes.
///
/// An empty outline is valid - an empty document yields no facts and
/// therefore nothing to structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level nodes in production order
    pub nodes: Vec<OutlineNode>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the outline has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in depth-first order.
    pub fn walk(&self) -> Vec<&OutlineNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&OutlineNode> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Total node count (all depths).
    pub fn node_count(&self) -> usize {
        self.walk().len()
    }

    /// Look up a node by id anywhere in the tree.
    pub fn get(&self, id: &str) -> Option<&OutlineNode> {
        self.walk().into_iter().find(|n| n.id == id)
    }

    /// Whether a node with this id exists.
    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids of nodes that cite facts directly.
    pub fn fact_bearing_ids(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter(|n| !n.fact_ids.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }
}
