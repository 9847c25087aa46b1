//! Output validation — re-analyzes transformer output against quality gates.
//!
//! Thresholds are tuning constants, not invariants; they live in
//! `ValidatorConfig` so they can be adjusted without touching the gates.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::optimizer::patterns::{MECHANICAL_PHRASES, META_COMMENT_DETECT};

/// Sentence boundaries: a run of terminator punctuation counts once.
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Quality-gate thresholds. Defaults reproduce the documented behavior.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    /// Minimum structural-improvement percentage required to pass.
    pub min_structural_improvement: i64,
    /// A single word repeating more than this many times is a stuffing risk.
    pub max_word_repeats: usize,
    /// A single word above this share of total words is a stuffing risk.
    pub max_word_density: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_structural_improvement: 15,
            max_word_repeats: 5,
            max_word_density: 0.10,
        }
    }
}

/// Pass/fail verdict with per-gate reasons. `passed` is a pure function of
/// the other four fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub has_meta_comments: bool,
    pub has_mechanical_phrases: bool,
    /// Average of word-count and sentence-count percentage deltas, rounded.
    pub structural_improvement: i64,
    pub keyword_stuffing_risk: bool,
    pub passed: bool,
}

/// Validates transformer output against the original text.
pub fn validate(original: &str, optimized: &str) -> ValidationResult {
    validate_with(original, optimized, ValidatorConfig::default())
}

pub fn validate_with(original: &str, optimized: &str, config: ValidatorConfig) -> ValidationResult {
    let has_meta_comments = has_meta_comments(optimized);
    let has_mechanical_phrases = has_mechanical_phrases(optimized);
    let structural_improvement = structural_improvement(original, optimized);
    let keyword_stuffing_risk = keyword_stuffing_risk(optimized, &config);

    let passed = !has_meta_comments
        && !has_mechanical_phrases
        && structural_improvement >= config.min_structural_improvement
        && !keyword_stuffing_risk;

    ValidationResult {
        has_meta_comments,
        has_mechanical_phrases,
        structural_improvement,
        keyword_stuffing_risk,
        passed,
    }
}

fn has_meta_comments(text: &str) -> bool {
    META_COMMENT_DETECT.iter().any(|re| re.is_match(text))
}

fn has_mechanical_phrases(text: &str) -> bool {
    let lower = text.to_lowercase();
    MECHANICAL_PHRASES
        .iter()
        .any(|phrase| lower.contains(&phrase.to_lowercase()))
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn sentence_count(text: &str) -> usize {
    SENTENCE_BOUNDARY.split(text).count()
}

/// Percentage delta between two counts, guarded against a zero baseline
/// (0% rather than a division by zero).
fn percent_delta(before: usize, after: usize) -> f64 {
    if before == 0 {
        return 0.0;
    }
    (before.abs_diff(after) as f64) / (before as f64) * 100.0
}

fn structural_improvement(original: &str, optimized: &str) -> i64 {
    let word_delta = percent_delta(word_count(original), word_count(optimized));
    let sentence_delta = percent_delta(sentence_count(original), sentence_count(optimized));
    ((word_delta + sentence_delta) / 2.0).round() as i64
}

/// Whole-document stuffing check: any word of length ≥ 4 repeating past the
/// count or density threshold.
fn keyword_stuffing_risk(text: &str, config: &ValidatorConfig) -> bool {
    let words: Vec<String> = text
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.to_string())
        .collect();
    let total = words.len();
    if total == 0 {
        return false;
    }

    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for word in &words {
        if word.len() >= 4 {
            *counts.entry(word.as_str()).or_insert(0) += 1;
        }
    }

    counts.values().any(|&count| {
        count > config.max_word_repeats || (count as f64 / total as f64) > config.max_word_density
    })
}
