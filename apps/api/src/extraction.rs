//! Extraction & repair — isolates the JSON-like span in raw model output and
//! applies a bounded sequence of textual repairs before parsing.
//!
//! This is heuristic repair, not a guarantee: a parse failure downstream is
//! an expected outcome, surfaced as a typed error with a bounded diagnostic
//! snippet (never the full, possibly sensitive, input).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Maximum diagnostic snippet length, in characters.
const SNIPPET_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model did not return a JSON object")]
    NoJsonObjectFound,

    #[error("model output could not be parsed as JSON (snippet: {snippet})")]
    UnrepairableOutput { snippet: String },
}

/// The record keys the model is asked to emit. Only these are quoted by the
/// unquoted-key repair — a closed-world fix, not general key inference.
const KNOWN_KEYS: &[&str] = &[
    "score",
    "missingKeywords",
    "headline",
    "summary",
    "rewrittenBullets",
    "keyword",
    "whyItMatters",
    "original",
    "improved",
];

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n\r]*").unwrap());
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static TRAILING_COMMA_BRACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\}").unwrap());
static TRAILING_COMMA_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*\]").unwrap());
static UNQUOTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b\s*:", KNOWN_KEYS.join("|"))).unwrap()
});
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^'\\]*(?:\\.[^'\\]*)*)'").unwrap());
static CODE_FENCE_JSON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```json\s*").unwrap());
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\s*").unwrap());

/// Locates the JSON-like span in raw model output: strips code fences, then
/// takes the inclusive substring from the first `{` to the last `}`.
/// Intentionally permissive — no brace-balance validation — because backends
/// frequently wrap output in explanatory prose.
pub fn extract_candidate(raw: &str) -> Result<String, ExtractError> {
    let no_fences = CODE_FENCE_JSON.replace_all(raw.trim(), "");
    let no_fences = CODE_FENCE.replace_all(&no_fences, "");
    let no_fences = no_fences.trim();

    let first = no_fences.find('{');
    let last = no_fences.rfind('}');

    match (first, last) {
        (Some(open), Some(close)) if close > open => {
            Ok(no_fences[open..=close].to_string())
        }
        _ => Err(ExtractError::NoJsonObjectFound),
    }
}

/// Applies the fixed repair sequence. Order matters: later steps assume
/// earlier ones already ran.
pub fn repair(candidate: &str) -> String {
    let mut text = candidate.trim().to_string();

    // 1) strip // and /* */ comments
    text = LINE_COMMENT.replace_all(&text, "").into_owned();
    text = BLOCK_COMMENT.replace_all(&text, "").into_owned();

    // 2) remove trailing commas before } or ]
    text = TRAILING_COMMA_BRACE.replace_all(&text, "}").into_owned();
    text = TRAILING_COMMA_BRACKET.replace_all(&text, "]").into_owned();

    // 3) quote known keys left unquoted (a quoted key is not re-matched:
    //    the closing quote sits between the key and the colon)
    text = UNQUOTED_KEY.replace_all(&text, "\"$1\":").into_owned();

    // 4) normalize smart quotes
    text = text
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 5) best-effort single-to-double quote conversion. Lossy for strings
    //    with interior apostrophes; documented limitation, kept as-is.
    text = SINGLE_QUOTED.replace_all(&text, "\"$1\"").into_owned();

    text.trim().to_string()
}

/// Parses the candidate strictly; on failure retries on the repaired text.
/// Both failing surfaces a bounded snippet for operator logs.
pub fn parse_repaired(candidate: &str) -> Result<Value, ExtractError> {
    if let Ok(value) = serde_json::from_str::<Value>(candidate) {
        return Ok(value);
    }

    let repaired = repair(candidate);
    serde_json::from_str::<Value>(&repaired).map_err(|_| ExtractError::UnrepairableOutput {
        snippet: snippet(candidate),
    })
}

/// First `SNIPPET_LIMIT` characters, never splitting a UTF-8 boundary.
fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LIMIT).collect()
}
