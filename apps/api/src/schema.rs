//! Record schema — the validated shape of a pipeline-A result, and the sole
//! gate between untrusted model output and the rest of the system.
//!
//! Validation walks the parsed value by hand so errors can name the exact
//! offending field path (e.g. `missingKeywords[2].whyItMatters`). It never
//! returns a partially populated record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A parsed value failed a shape or range constraint.
#[derive(Debug, Error)]
#[error("invalid field `{field}`: {message}")]
pub struct SchemaError {
    pub field: String,
    pub message: String,
}

impl SchemaError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A keyword present in the JD but absent or weak in the resume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MissingKeyword {
    pub keyword: String,
    pub why_it_matters: String,
}

/// An original resume bullet and its improved rewrite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewrittenBullet {
    pub original: String,
    pub improved: String,
}

/// The validated output of a generation call. Field names in serialized form
/// are the wire contract history consumers re-hydrate against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub score: u8,
    pub headline: String,
    pub summary: String,
    /// Absent in the raw value becomes empty, never a missing field.
    #[serde(default)]
    pub missing_keywords: Vec<MissingKeyword>,
    #[serde(default)]
    pub rewritten_bullets: Vec<RewrittenBullet>,
}

/// Validates an untrusted parsed value into a `GenerationRecord`.
pub fn validate(value: &Value) -> Result<GenerationRecord, SchemaError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError::new("$", "expected a JSON object"))?;

    let score = require_int(obj.get("score"), "score")?;
    if !(0..=100).contains(&score) {
        return Err(SchemaError::new(
            "score",
            format!("must be between 0 and 100, got {score}"),
        ));
    }

    let headline = require_string(obj.get("headline"), "headline")?;
    let summary = require_string(obj.get("summary"), "summary")?;

    let missing_keywords = match obj.get("missingKeywords") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => parse_array(v, "missingKeywords", |item, path| {
            Ok(MissingKeyword {
                keyword: require_string(item.get("keyword"), &format!("{path}.keyword"))?,
                why_it_matters: require_string(
                    item.get("whyItMatters"),
                    &format!("{path}.whyItMatters"),
                )?,
            })
        })?,
    };

    let rewritten_bullets = match obj.get("rewrittenBullets") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => parse_array(v, "rewrittenBullets", |item, path| {
            Ok(RewrittenBullet {
                original: require_string(item.get("original"), &format!("{path}.original"))?,
                improved: require_string(item.get("improved"), &format!("{path}.improved"))?,
            })
        })?,
    };

    Ok(GenerationRecord {
        score: score as u8,
        headline,
        summary,
        missing_keywords,
        rewritten_bullets,
    })
}

fn require_int(value: Option<&Value>, field: &str) -> Result<i64, SchemaError> {
    value
        .and_then(Value::as_i64)
        .ok_or_else(|| SchemaError::new(field, "expected an integer"))
}

fn require_string(value: Option<&Value>, field: &str) -> Result<String, SchemaError> {
    let s = value
        .and_then(Value::as_str)
        .ok_or_else(|| SchemaError::new(field, "expected a string"))?;
    // Non-empty means length ≥ 1; whitespace-only strings are accepted.
    if s.is_empty() {
        return Err(SchemaError::new(field, "must not be empty"));
    }
    Ok(s.to_string())
}

fn parse_array<T>(
    value: &Value,
    field: &str,
    parse_item: impl Fn(&serde_json::Map<String, Value>, &str) -> Result<T, SchemaError>,
) -> Result<Vec<T>, SchemaError> {
    let items = value
        .as_array()
        .ok_or_else(|| SchemaError::new(field, "expected an array"))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("{field}[{i}]");
            let obj = item
                .as_object()
                .ok_or_else(|| SchemaError::new(&path, "expected an object"))?;
            parse_item(obj, &path)
        })
        .collect()
}
