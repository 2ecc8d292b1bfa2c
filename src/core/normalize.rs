//! # Response Normalization
//!
//! Turns an arbitrary, not-necessarily-valid model reply into a structured
//! body. Never fails: every malformed input degrades to an empty-but-valid
//! structure with the raw text preserved as the summary.
//!
//! The JSON recovery is a priority-ordered cascade:
//! 1. no `{` anywhere → whole text is a plain-language summary
//! 2. fenced code block (``` markers, optional `json` tag)
//! 3. first-`{` .. last-`}` span (JSON embedded in prose)
//! 4. the full text as-is
//! 5. nothing parsed → raw text becomes the summary
//!
//! Grounding citations are handled separately and are independent of
//! whether body parsing succeeded.

use std::collections::HashSet;

use log::warn;
use serde_json::Value;

use crate::core::types::{GroundingSource, NavigationLink};
use crate::inference::Citation;

/// Substituted when a parsed body carries a non-string `summary`.
const PARSED_SUMMARY_FALLBACK: &str = "Analysis parsed.";

/// The structured portion of a model reply, before grounding is attached.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedBody {
    pub links: Vec<NavigationLink>,
    pub summary: String,
    pub scripts_and_stylesheets: Vec<String>,
}

/// Recovers a structured body from a raw model reply. Never fails.
pub fn parse_model_reply(text: &str) -> ParsedBody {
    // No JSON was even attempted: a pure refusal or conversational reply.
    if !text.contains('{') {
        return ParsedBody {
            links: Vec::new(),
            summary: text.trim().to_string(),
            scripts_and_stylesheets: Vec::new(),
        };
    }

    let value = fenced_block(text)
        .and_then(|inner| serde_json::from_str::<Value>(inner).ok())
        .or_else(|| brace_span(text).and_then(|span| serde_json::from_str(span).ok()))
        .or_else(|| serde_json::from_str(text).ok());

    match value {
        Some(value) => coerce_body(&value),
        None => {
            warn!("model reply was not valid JSON, falling back to raw text summary");
            ParsedBody {
                links: Vec::new(),
                summary: text.to_string(),
                scripts_and_stylesheets: Vec::new(),
            }
        }
    }
}

/// Returns the interior of the first fenced code block, if any.
/// The opening fence line (with its optional language tag) is skipped.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let body_start = after.find('\n')? + 1;
    let body = &after[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

/// Returns the substring from the first `{` to the last `}`, inclusive.
fn brace_span(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (last > first).then(|| &text[first..=last])
}

/// Defensive field coercion over a successfully parsed value:
/// wrong-typed fields become empty containers (or the fixed summary
/// fallback), never errors. Link elements decode individually so one
/// malformed entry does not discard its siblings.
fn coerce_body(value: &Value) -> ParsedBody {
    let links = value
        .get("links")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or(PARSED_SUMMARY_FALLBACK)
        .to_string();

    let scripts_and_stylesheets = value
        .get("scriptsAndStylesheets")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    ParsedBody {
        links,
        summary,
        scripts_and_stylesheets,
    }
}

/// Collects attribution sources from raw citations: entries missing a uri
/// or a title are discarded, duplicates by uri keep the first occurrence.
pub fn collect_grounding_sources(citations: &[Citation]) -> Vec<GroundingSource> {
    let mut seen: HashSet<&str> = HashSet::new();
    citations
        .iter()
        .filter(|c| !c.uri.is_empty() && !c.title.is_empty())
        .filter(|c| seen.insert(c.uri.as_str()))
        .map(|c| GroundingSource {
            title: c.title.clone(),
            uri: c.uri.clone(),
        })
        .collect()
}
