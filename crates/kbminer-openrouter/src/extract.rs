// SPDX-FileCopyrightText: 2026 kbminer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pulls the article object out of free-form model output.
//!
//! Reasoning models wrap their answer in `<think>` blocks and chatty models
//! add prose around it. Extraction is a heuristic: strip every reasoning
//! block, then parse the span from the first `{` to the last `}` as one JSON
//! object. Two separate objects in one reply therefore fail to parse.

use std::sync::LazyLock;

use kbminer_core::ArticleDraft;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Extract the JSON object embedded in `text`.
///
/// Returns `None` when there is no `{`...`}` span or the span is not a JSON
/// object.
pub fn extract_json_smart(text: &str) -> Option<Map<String, Value>> {
    let cleaned = THINK_BLOCK.replace_all(text, "");

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "model output is not valid JSON");
            None
        }
    }
}

/// Interpret an extracted object as an article decision.
///
/// Keys are `title`, `content`, `ignore`; `titulo`, `conteudo`, `ignorar`
/// are accepted too. A truthy ignore flag wins over everything else. A
/// non-ignored object needs both a non-empty title and content.
pub fn parse_article(object: &Map<String, Value>) -> Option<ArticleDraft> {
    let ignore = field(object, "ignore", "ignorar").is_some_and(is_truthy);
    if ignore {
        return Some(ArticleDraft::Ignore);
    }

    let title = text_field(object, "title", "titulo")?;
    let content = text_field(object, "content", "conteudo")?;
    Some(ArticleDraft::Article { title, content })
}

fn field<'a>(object: &'a Map<String, Value>, key: &str, alias: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| object.get(alias))
}

fn text_field(object: &Map<String, Value>, key: &str, alias: &str) -> Option<String> {
    field(object, key, alias)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Loose truthiness: `false`, `null`, zero, and empty values are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
