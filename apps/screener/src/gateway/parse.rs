//! Turns free-text model output into the shapes the interview needs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::gateway::GatewayError;
use crate::llm_client::strip_json_fences;

/// Longest follow-up remark kept, in characters.
const MAX_FOLLOWUP_CHARS: usize = 600;

lazy_static! {
    // "1. ...", "2) ...", "3: ...", "- ...", "* ...", "• ..."
    static ref LIST_ITEM_REGEX: Regex =
        Regex::new(r"^\s*(?:\d{1,2}\s*[.):]|[-*•])\s*(?P<item>.+)$").unwrap();
}

/// Splits a numbered or bulleted list (or a JSON string array) into questions.
/// Order is preserved and exact duplicates are dropped.
pub fn parse_question_list(raw: &str) -> Result<Vec<String>, GatewayError> {
    let text = strip_json_fences(raw);

    let items: Vec<String> = match serde_json::from_str::<Vec<String>>(text) {
        Ok(array) => array,
        Err(_) => text
            .lines()
            .filter_map(|line| LIST_ITEM_REGEX.captures(line))
            .filter_map(|caps| caps.name("item").map(|m| m.as_str().to_string()))
            .collect(),
    };

    let mut questions: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let cleaned = clean_item(&item);
        if !cleaned.is_empty() && !questions.contains(&cleaned) {
            questions.push(cleaned);
        }
    }

    if questions.is_empty() {
        return Err(GatewayError::Unparseable(preview(raw)));
    }
    Ok(questions)
}

/// Normalizes a follow-up remark to a single trimmed paragraph.
pub fn parse_followup(raw: &str) -> Result<String, GatewayError> {
    let collapsed = raw
        .replace("**", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.is_empty() {
        return Err(GatewayError::Unparseable("empty follow-up".to_string()));
    }

    if collapsed.chars().count() <= MAX_FOLLOWUP_CHARS {
        return Ok(collapsed);
    }

    // Cut at the last sentence end inside the limit, else hard-cut.
    let truncated: String = collapsed.chars().take(MAX_FOLLOWUP_CHARS).collect();
    match truncated.rfind(['.', '!', '?']) {
        Some(idx) => Ok(truncated[..=idx].to_string()),
        None => Ok(truncated),
    }
}

fn clean_item(item: &str) -> String {
    item.replace("**", "")
        .trim()
        .trim_matches('"')
        .trim()
        .to_string()
}

fn preview(raw: &str) -> String {
    let preview: String = raw.trim().chars().take(80).collect();
    if preview.is_empty() {
        "empty response".to_string()
    } else {
        preview
    }
}
