//! The four pipeline stages.
//!
//! Each stage implements the [`Stage`](crate::traits::stage::Stage) contract.
//! The three generative stages (extractor, structurer, summarizer) delegate
//! to a [`Collaborator`](crate::traits::collaborator::Collaborator); the
//! validator is pure computation over the artifacts the earlier stages
//! produced.

pub mod extractor;
pub mod structurer;
pub mod summarizer;
pub mod validator;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{StageError, StageResult};
use crate::pipeline::prompts;
use crate::traits::collaborator::{Collaborator, PromptKind};

/// Strip a Markdown code fence wrapper from a collaborator reply.
///
/// Models frequently wrap JSON in ```json fences despite instructions not
/// to. The content inside the fence is returned unchanged; replies without
/// a fence come back trimmed.
pub(crate) fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line, if any.
    let body = match body.split_once('\n') {
        Some((first_line, rest)) if !first_line.contains('{') && !first_line.contains('[') => rest,
        _ => body,
    };
    body.trim()
}

/// Parse a collaborator reply as JSON, with one repair round on failure.
///
/// When the first parse fails, the broken reply is sent back to the
/// collaborator with a repair prompt and parsed once more. A second parse
/// failure is a `MalformedResponse` stage error; there is no retry loop.
pub(crate) async fn parse_or_repair<T, C>(collaborator: &C, reply: &str) -> StageResult<T>
where
    T: DeserializeOwned,
    C: Collaborator + ?Sized,
{
    let cleaned = strip_code_fences(reply);
    match serde_json::from_str(cleaned) {
        Ok(parsed) => Ok(parsed),
        Err(first_err) => {
            debug!(error = %first_err, "reply is not valid JSON, attempting one repair round");
            let repaired = collaborator
                .generate(PromptKind::RepairJson, &prompts::format_repair_prompt(cleaned))
                .await?;
            serde_json::from_str(strip_code_fences(&repaired)).map_err(|err| {
                StageError::MalformedResponse {
                    reason: format!("reply is not valid JSON after repair: {err}"),
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCollaborator;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        value: u32,
    }

    #[test]
    fn test_strip_code_fences_removes_json_fence() {
        let reply = "```json\n{\"value\": 1}\n```";
        assert_eq!(strip_code_fences(reply), "{\"value\": 1}");
    }

    #[test]
    fn test_strip_code_fences_leaves_plain_json() {
        assert_eq!(strip_code_fences("  {\"value\": 1} "), "{\"value\": 1}");
    }

    #[test]
    fn test_strip_code_fences_bare_fence() {
        let reply = "```\n{\"value\": 2}\n```";
        assert_eq!(strip_code_fences(reply), "{\"value\": 2}");
    }

    #[tokio::test]
    async fn test_parse_or_repair_valid_json_skips_repair() {
        let mock = MockCollaborator::default();
        let parsed: Reply = parse_or_repair(&mock, "{\"value\": 7}").await.unwrap();
        assert_eq!(parsed, Reply { value: 7 });
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_parse_or_repair_one_repair_round() {
        let mock = MockCollaborator::default().with_reply(PromptKind::RepairJson, "{\"value\": 7}");
        let parsed: Reply = parse_or_repair(&mock, "{value: 7}").await.unwrap();
        assert_eq!(parsed, Reply { value: 7 });

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].kind, PromptKind::RepairJson);
    }

    #[tokio::test]
    async fn test_parse_or_repair_fails_after_second_bad_reply() {
        let mock = MockCollaborator::default().with_reply(PromptKind::RepairJson, "still broken");
        let result: StageResult<Reply> = parse_or_repair(&mock, "{value: 7}").await;
        assert!(matches!(result, Err(StageError::MalformedResponse { .. })));
    }
}
