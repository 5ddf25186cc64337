//! LLM prompts for the transformation stages.
//!
//! These prompts are designed for evidence-grounded extraction: every fact
//! quotes its source, every outline section cites fact ids, every summary
//! segment cites outline node ids. The validator later holds each artifact
//! to those citations.

use crate::types::fact::FactSet;
use crate::types::outline::{Outline, OutlineNode};

/// Prompt for extracting atomic, source-grounded facts.
pub const EXTRACT_FACTS_PROMPT: &str = r#"Extract atomic facts from this document.

Rules:
1. Each fact is a single, independently verifiable statement
2. For EVERY fact, quote the source text that supports it
3. Never invent a fact without a supporting quote
4. Keep statements short - one clause, under 140 characters

Output JSON:
{
    "facts": [
        {
            "statement": "The fact being stated",
            "source_reference": "Exact quote or close span from the document"
        }
    ]
}

Document:
{text}"#;

/// Prompt for organizing facts into a hierarchical outline.
pub const BUILD_OUTLINE_PROMPT: &str = r#"Organize these facts into a hierarchical outline.

Rules:
1. Every fact must appear under at least one section
2. Cite facts by their id
3. A section with no subsections must cite at least one fact
4. Order sections the way a reader should encounter them

Facts:
{facts}

Output JSON:
{
    "sections": [
        {
            "heading": "Section heading",
            "fact_ids": ["f1", "f2"],
            "children": []
        }
    ]
}

Children have the same shape as sections and may nest further."#;

/// Prompt for writing summary prose from the outline.
pub const SUMMARIZE_PROMPT: &str = r#"Write an executive summary from this outline.

Rules:
1. Every segment must cite the outline node ids that support it
2. Never add a claim the cited nodes do not support
3. Minor details may be omitted; fabrications may not

Outline:
{outline}

Output JSON:
{
    "segments": [
        {
            "text": "One to three sentences of summary prose",
            "supporting_outline_ids": ["n1"]
        }
    ]
}"#;

/// Prompt for repairing a syntactically broken JSON reply.
pub const REPAIR_JSON_PROMPT: &str = r#"Fix this into valid JSON only. No markdown or explanation.
Keep the same shape and content; change nothing but the syntax.

Content:
{content}"#;

/// Format the fact extraction prompt.
pub fn format_extract_prompt(text: &str) -> String {
    EXTRACT_FACTS_PROMPT.replace("{text}", text)
}

/// Format the outline prompt with the fact set.
pub fn format_outline_prompt(facts: &FactSet) -> String {
    let facts_text = facts
        .facts
        .iter()
        .map(|f| format!("{}: {}", f.id, f.statement))
        .collect::<Vec<_>>()
        .join("\n");

    BUILD_OUTLINE_PROMPT.replace("{facts}", &facts_text)
}

/// Format the summary prompt with the outline.
pub fn format_summarize_prompt(outline: &Outline) -> String {
    let mut lines = Vec::new();
    for node in &outline.nodes {
        render_node(&mut lines, node, 0);
    }

    SUMMARIZE_PROMPT.replace("{outline}", &lines.join("\n"))
}

/// Format the JSON repair prompt.
pub fn format_repair_prompt(raw: &str) -> String {
    REPAIR_JSON_PROMPT.replace("{content}", raw)
}

fn render_node(lines: &mut Vec<String>, node: &OutlineNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let facts = if node.fact_ids.is_empty() {
        String::new()
    } else {
        format!(
            " (facts: {})",
            node.fact_ids.iter().cloned().collect::<Vec<_>>().join(", ")
        )
    };
    lines.push(format!("{indent}{}. {}{facts}", node.id, node.heading));

    for child in &node.children {
        render_node(lines, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fact::Fact;

    #[test]
    fn test_format_extract_prompt() {
        let formatted = format_extract_prompt("Revenue grew by 10% this quarter.");
        assert!(formatted.contains("Revenue grew by 10% this quarter."));
        assert!(formatted.contains("source_reference"));
    }

    #[test]
    fn test_format_outline_prompt_lists_fact_ids() {
        let facts = FactSet {
            facts: vec![
                Fact::new("f1", "Revenue grew 10%", "revenue grew by 10%"),
                Fact::new("f2", "Refunds spiked in week 6", "refunds spiked around week 6"),
            ],
        };

        let formatted = format_outline_prompt(&facts);
        assert!(formatted.contains("f1: Revenue grew 10%"));
        assert!(formatted.contains("f2: Refunds spiked in week 6"));
    }

    #[test]
    fn test_format_summarize_prompt_renders_hierarchy() {
        let outline = Outline {
            nodes: vec![OutlineNode::new("n1", "Performance")
                .with_fact("f1")
                .with_child(OutlineNode::new("n2", "Refunds").with_fact("f2"))],
        };

        let formatted = format_summarize_prompt(&outline);
        assert!(formatted.contains("n1. Performance (facts: f1)"));
        assert!(formatted.contains("  n2. Refunds (facts: f2)"));
    }
}
