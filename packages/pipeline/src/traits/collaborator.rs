//! The external collaborator contract.
//!
//! Each transformation stage delegates its text generation to an opaque
//! external collaborator (a language model): prompt in, structured text out.
//! Prompting specifics, model selection, and retries against model APIs all
//! live behind this trait; the pipeline core only sees `generate`.

use async_trait::async_trait;

use crate::error::CollaboratorResult;

/// Which kind of generation a stage is asking for.
///
/// Implementations may pick system messages or decoding parameters per kind;
/// the pipeline core only uses it to keep requests attributable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// Turn raw document text into atomic facts
    ExtractFacts,

    /// Organize facts into a hierarchical outline
    BuildOutline,

    /// Produce summary prose from the outline
    Summarize,

    /// Repair a syntactically broken JSON reply (single attempt)
    RepairJson,
}

impl PromptKind {
    /// Stable lowercase name, used in logs and mock call records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::ExtractFacts => "extract_facts",
            PromptKind::BuildOutline => "build_outline",
            PromptKind::Summarize => "summarize",
            PromptKind::RepairJson => "repair_json",
        }
    }
}

/// The external language-model collaborator.
///
/// Implementations wrap specific providers (OpenAI, a local model, a mock)
/// and must surface failures as `CollaboratorError` - timeouts, quota, and
/// transport errors are expected outcomes, never panics. `generate` is the
/// single awaited operation a stage blocks on.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Generate text for the given prompt.
    async fn generate(&self, kind: PromptKind, prompt: &str) -> CollaboratorResult<String>;
}
