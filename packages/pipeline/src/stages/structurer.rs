//! Outline structuring stage.
//!
//! Organizes the extracted facts into a hierarchical [`Outline`]. Node ids
//! are assigned here in depth-first order, so the collaborator only names
//! headings and cites fact ids; it never invents node identifiers.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::StageResult;
use crate::pipeline::prompts;
use crate::traits::collaborator::{Collaborator, PromptKind};
use crate::traits::stage::{Stage, StageInput};
use crate::types::artifact::{Artifact, ArtifactKind};
use crate::types::outline::{Outline, OutlineNode};

/// Builds the hierarchical outline from the fact set.
pub struct Structurer<'a, C: Collaborator + ?Sized> {
    collaborator: &'a C,
}

#[derive(Debug, Deserialize)]
struct OutlineReply {
    #[serde(default)]
    sections: Vec<SectionReply>,
}

#[derive(Debug, Deserialize)]
struct SectionReply {
    heading: String,
    #[serde(default)]
    fact_ids: Vec<String>,
    #[serde(default)]
    children: Vec<SectionReply>,
}

impl<'a, C: Collaborator + ?Sized> Structurer<'a, C> {
    pub fn new(collaborator: &'a C) -> Self {
        Self { collaborator }
    }
}

#[async_trait]
impl<C: Collaborator + ?Sized> Stage for Structurer<'_, C> {
    fn name(&self) -> &'static str {
        "structurer"
    }

    fn input_kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Facts]
    }

    fn output_kind(&self) -> ArtifactKind {
        ArtifactKind::Outline
    }

    async fn run(&self, input: StageInput<'_>) -> StageResult<Artifact> {
        let facts = input.require_facts()?;
        if facts.is_empty() {
            debug!("no facts to organize, producing an empty outline");
            return Ok(Artifact::Outline(Outline::new()));
        }

        let prompt = prompts::format_outline_prompt(facts);
        let reply = self
            .collaborator
            .generate(PromptKind::BuildOutline, &prompt)
            .await?;

        let parsed: OutlineReply = super::parse_or_repair(self.collaborator, &reply).await?;

        let mut counter = 0usize;
        let nodes = parsed
            .sections
            .into_iter()
            .map(|s| build_node(s, &mut counter))
            .collect();
        let outline = Outline { nodes };
        debug!(nodes = outline.node_count(), "built outline");

        Ok(Artifact::Outline(outline))
    }
}

fn build_node(section: SectionReply, counter: &mut usize) -> OutlineNode {
    *counter += 1;
    let mut node = OutlineNode::new(format!("n{counter}"), section.heading.trim());
    node.fact_ids = section
        .fact_ids
        .into_iter()
        .map(|id| id.trim().to_string())
        .collect();
    node.children = section
        .children
        .into_iter()
        .map(|child| build_node(child, counter))
        .collect();
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCollaborator;
    use crate::types::fact::{Fact, FactSet};

    fn facts() -> FactSet {
        FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Refunds spiked in week 6", "refunds spiked around week 6"),
            ],
        }
    }

    #[tokio::test]
    async fn test_empty_facts_skip_collaborator() {
        let mock = MockCollaborator::default();
        let stage = Structurer::new(&mock);
        let empty = FactSet::new();

        let mut input = StageInput::from_text("");
        input.facts = Some(&empty);

        let artifact = stage.run(input).await.unwrap();
        assert!(artifact.into_outline().unwrap().nodes.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_facts_is_stage_error() {
        let mock = MockCollaborator::default();
        let stage = Structurer::new(&mock);

        let result = stage.run(StageInput::from_text("doc")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ids_assigned_depth_first() {
        let mock = MockCollaborator::default().with_reply(
            PromptKind::BuildOutline,
            r#"{"sections": [
                {"heading": "Performance", "fact_ids": ["f1"], "children": [
                    {"heading": "Refunds", "fact_ids": ["f2"]}
                ]},
                {"heading": "Outlook", "fact_ids": ["f1"]}
            ]}"#,
        );
        let stage = Structurer::new(&mock);
        let facts = facts();

        let mut input = StageInput::from_text("doc");
        input.facts = Some(&facts);

        let outline = stage.run(input).await.unwrap().into_outline().unwrap();
        let ids: Vec<&str> = outline.walk().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2", "n3"]);
        assert_eq!(outline.get("n2").unwrap().heading, "Refunds");
    }

    #[tokio::test]
    async fn test_cited_fact_ids_preserved() {
        let mock = MockCollaborator::default().with_reply(
            PromptKind::BuildOutline,
            r#"{"sections": [{"heading": "Performance", "fact_ids": ["f1", "f2"]}]}"#,
        );
        let stage = Structurer::new(&mock);
        let facts = facts();

        let mut input = StageInput::from_text("doc");
        input.facts = Some(&facts);

        let outline = stage.run(input).await.unwrap().into_outline().unwrap();
        let node = outline.get("n1").unwrap();
        assert!(node.fact_ids.contains("f1"));
        assert!(node.fact_ids.contains("f2"));
    }
}
