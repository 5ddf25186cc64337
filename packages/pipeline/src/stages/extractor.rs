//! Fact extraction stage.
//!
//! Turns raw document text into a [`FactSet`] of atomic, source-referenced
//! statements. Replies are normalized before they become an artifact:
//! statements are trimmed, truncated to the configured length, deduplicated,
//! and (in strict provenance mode) dropped when their source reference does
//! not plausibly come from the document.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::StageResult;
use crate::pipeline::prompts;
use crate::traits::collaborator::{Collaborator, PromptKind};
use crate::traits::stage::{Stage, StageInput};
use crate::types::artifact::{Artifact, ArtifactKind};
use crate::types::config::PipelineConfig;
use crate::types::fact::{Fact, FactSet};

/// Extracts atomic facts from the raw document.
pub struct FactExtractor<'a, C: Collaborator + ?Sized> {
    collaborator: &'a C,
    config: &'a PipelineConfig,
}

#[derive(Debug, Deserialize)]
struct FactsReply {
    #[serde(default)]
    facts: Vec<FactReply>,
}

#[derive(Debug, Deserialize)]
struct FactReply {
    statement: String,
    #[serde(default)]
    source_reference: String,
}

impl<'a, C: Collaborator + ?Sized> FactExtractor<'a, C> {
    pub fn new(collaborator: &'a C, config: &'a PipelineConfig) -> Self {
        Self {
            collaborator,
            config,
        }
    }

    fn normalize(&self, raw_text: &str, replies: Vec<FactReply>) -> FactSet {
        let mut facts = FactSet::new();
        let mut seen_statements: Vec<String> = Vec::new();

        for reply in replies {
            let statement = truncate_chars(reply.statement.trim(), self.config.max_statement_len);
            if statement.is_empty() {
                continue;
            }
            if seen_statements.iter().any(|s| s == &statement) {
                continue;
            }

            let source_reference = reply.source_reference.trim().to_string();
            if self.config.strict_provenance
                && !source_reference.is_empty()
                && !reference_appears_in(raw_text, &source_reference)
            {
                warn!(
                    statement = %statement,
                    "dropping fact whose source reference does not appear in the document"
                );
                continue;
            }

            let id = format!("f{}", facts.len() + 1);
            seen_statements.push(statement.clone());
            facts.facts.push(Fact::new(id, statement, source_reference));
        }

        facts
    }
}

#[async_trait]
impl<C: Collaborator + ?Sized> Stage for FactExtractor<'_, C> {
    fn name(&self) -> &'static str {
        "extractor"
    }

    fn input_kinds(&self) -> &'static [ArtifactKind] {
        &[]
    }

    fn output_kind(&self) -> ArtifactKind {
        ArtifactKind::Facts
    }

    async fn run(&self, input: StageInput<'_>) -> StageResult<Artifact> {
        if input.raw_text.trim().is_empty() {
            debug!("document is empty, producing an empty fact set");
            return Ok(Artifact::Facts(FactSet::new()));
        }

        let prompt = prompts::format_extract_prompt(input.raw_text);
        let reply = self
            .collaborator
            .generate(PromptKind::ExtractFacts, &prompt)
            .await?;

        let parsed: FactsReply = super::parse_or_repair(self.collaborator, &reply).await?;
        let facts = self.normalize(input.raw_text, parsed.facts);
        debug!(count = facts.len(), "extracted facts");

        Ok(Artifact::Facts(facts))
    }
}

/// Truncate to at most `max` characters without splitting a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}

/// Whether a source reference plausibly comes from the document.
///
/// Accepts an exact case-insensitive substring match, or a paraphrase where
/// at least half of the reference's content words appear in the document.
fn reference_appears_in(raw_text: &str, reference: &str) -> bool {
    let haystack = raw_text.to_lowercase();
    let needle = reference.to_lowercase();
    if haystack.contains(&needle) {
        return true;
    }

    let words: Vec<&str> = needle
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 4)
        .collect();
    if words.is_empty() {
        return false;
    }
    let present = words.iter().filter(|w| haystack.contains(**w)).count();
    present * 2 >= words.len()
}
