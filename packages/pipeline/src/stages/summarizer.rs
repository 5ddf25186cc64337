//! Summary generation stage.
//!
//! Writes executive-summary prose from the outline. Each segment carries the
//! outline node ids it claims support from; the validator later checks those
//! claims against the actual facts.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::StageResult;
use crate::pipeline::prompts;
use crate::traits::collaborator::{Collaborator, PromptKind};
use crate::traits::stage::{Stage, StageInput};
use crate::types::artifact::{Artifact, ArtifactKind};
use crate::types::summary::{Summary, SummarySegment};

/// Produces the executive summary from the outline.
pub struct Summarizer<'a, C: Collaborator + ?Sized> {
    collaborator: &'a C,
}

#[derive(Debug, Deserialize)]
struct SummaryReply {
    #[serde(default)]
    segments: Vec<SegmentReply>,
}

#[derive(Debug, Deserialize)]
struct SegmentReply {
    text: String,
    #[serde(default)]
    supporting_outline_ids: Vec<String>,
}

impl<'a, C: Collaborator + ?Sized> Summarizer<'a, C> {
    pub fn new(collaborator: &'a C) -> Self {
        Self { collaborator }
    }
}

#[async_trait]
impl<C: Collaborator + ?Sized> Stage for Summarizer<'_, C> {
    fn name(&self) -> &'static str {
        "summarizer"
    }

    fn input_kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Outline]
    }

    fn output_kind(&self) -> ArtifactKind {
        ArtifactKind::Summary
    }

    async fn run(&self, input: StageInput<'_>) -> StageResult<Artifact> {
        let outline = input.require_outline()?;
        if outline.nodes.is_empty() {
            debug!("outline is empty, producing an empty summary");
            return Ok(Artifact::Summary(Summary::new()));
        }

        let prompt = prompts::format_summarize_prompt(outline);
        let reply = self
            .collaborator
            .generate(PromptKind::Summarize, &prompt)
            .await?;

        let parsed: SummaryReply = super::parse_or_repair(self.collaborator, &reply).await?;

        let segments = parsed
            .segments
            .into_iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| {
                let mut segment = SummarySegment::new(s.text.trim());
                segment.supporting_outline_ids = s
                    .supporting_outline_ids
                    .into_iter()
                    .map(|id| id.trim().to_string())
                    .collect();
                segment
            })
            .collect();
        let summary = Summary { segments };
        debug!(segments = summary.segments.len(), "wrote summary");

        Ok(Artifact::Summary(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCollaborator;
    use crate::types::outline::{Outline, OutlineNode};

    fn outline() -> Outline {
        Outline {
            nodes: vec![OutlineNode::new("n1", "Performance").with_fact("f1")],
        }
    }

    #[tokio::test]
    async fn test_empty_outline_skips_collaborator() {
        let mock = MockCollaborator::default();
        let stage = Summarizer::new(&mock);
        let empty = Outline::new();

        let mut input = StageInput::from_text("");
        input.outline = Some(&empty);

        let artifact = stage.run(input).await.unwrap();
        assert!(artifact.into_summary().unwrap().segments.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_segments_carry_supporting_ids() {
        let mock = MockCollaborator::default().with_reply(
            PromptKind::Summarize,
            r#"{"segments": [
                {"text": "Revenue grew 10% last quarter.", "supporting_outline_ids": ["n1"]}
            ]}"#,
        );
        let stage = Summarizer::new(&mock);
        let outline = outline();

        let mut input = StageInput::from_text("doc");
        input.outline = Some(&outline);

        let summary = stage.run(input).await.unwrap().into_summary().unwrap();
        assert_eq!(summary.segments.len(), 1);
        assert!(summary.segments[0].supporting_outline_ids.contains("n1"));
    }

    #[tokio::test]
    async fn test_blank_segments_dropped() {
        let mock = MockCollaborator::default().with_reply(
            PromptKind::Summarize,
            r#"{"segments": [
                {"text": "   ", "supporting_outline_ids": ["n1"]},
                {"text": "Revenue grew.", "supporting_outline_ids": ["n1"]}
            ]}"#,
        );
        let stage = Summarizer::new(&mock);
        let outline = outline();

        let mut input = StageInput::from_text("doc");
        input.outline = Some(&outline);

        let summary = stage.run(input).await.unwrap().into_summary().unwrap();
        assert_eq!(summary.segments.len(), 1);
        assert_eq!(summary.segments[0].text, "Revenue grew.");
    }
}
