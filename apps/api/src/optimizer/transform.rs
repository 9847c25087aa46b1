//! Deterministic resume rewriting. Four fixed passes, in order: strengthen
//! weak verbs, remove mechanical filler, inject missing high-value phrases,
//! strip meta-commentary. Later passes operate on the output of earlier ones.

use std::sync::LazyLock;

use regex::Regex;

use crate::optimizer::gap;
use crate::optimizer::patterns::{
    injection_trigger, MECHANICAL_PHRASES, META_COMMENT_STRIP, PHRASE_INJECTION_RULES,
    WEAK_VERB_REPLACEMENTS,
};

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DOUBLE_PERIOD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.\s+\.").unwrap());

/// Multiline variants of the weak openers, paired with replacements.
static WEAK_OPENER_REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    WEAK_VERB_REPLACEMENTS
        .iter()
        .map(|(weak, strong)| {
            (
                Regex::new(&format!("(?m)^{}", regex::escape(weak))).unwrap(),
                *strong,
            )
        })
        .collect()
});

/// Case-insensitive matchers for the injection trigger terms, by trigger.
static TRIGGER_MATCHERS: LazyLock<std::collections::HashMap<&'static str, Regex>> =
    LazyLock::new(|| {
        PHRASE_INJECTION_RULES
            .iter()
            .map(|(_, trigger, _)| {
                (
                    *trigger,
                    Regex::new(&format!("(?i){}", regex::escape(trigger))).unwrap(),
                )
            })
            .collect()
    });

/// Case-insensitive matchers for the mechanical-phrase table.
static MECHANICAL_MATCHERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MECHANICAL_PHRASES
        .iter()
        .map(|phrase| Regex::new(&format!("(?i){}", regex::escape(phrase))).unwrap())
        .collect()
});

/// Rewrites a resume against a job description. Pure function of its inputs;
/// computes its own gap report internally. Empty input yields empty output.
pub fn optimize(resume: &str, job_description: &str) -> String {
    let gap = gap::analyze(resume, job_description);

    let text = strengthen_verbs(resume);
    let text = remove_mechanical_phrases(&text);
    let text = inject_exact_phrases(&text, &gap.missing);
    strip_meta_comments(&text)
}

/// Replaces weak line openers with their stronger equivalents, per line.
fn strengthen_verbs(text: &str) -> String {
    let mut result = text.to_string();
    for (re, strong) in WEAK_OPENER_REWRITES.iter() {
        result = re.replace_all(&result, *strong).into_owned();
    }
    result
}

/// Deletes every mechanical-phrase-table entry case-insensitively, then
/// collapses whitespace runs and stray ". ." fragments.
fn remove_mechanical_phrases(text: &str) -> String {
    let mut result = text.to_string();
    for re in MECHANICAL_MATCHERS.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    let result = WHITESPACE_RUN.replace_all(&result, " ");
    let result = DOUBLE_PERIOD.replace_all(&result, ".");
    result.trim().to_string()
}

/// Substitutes known weaker terms with the fuller high-value phrase, for
/// each missing phrase that has an injection rule whose trigger is present.
/// Phrases with no matching trigger are left unintroduced.
fn inject_exact_phrases(text: &str, missing: &[String]) -> String {
    let mut result = text.to_string();
    for phrase in missing {
        if result.to_lowercase().contains(&phrase.to_lowercase()) {
            continue;
        }
        let Some((trigger, replacement)) = injection_trigger(phrase) else {
            continue;
        };
        if result.to_lowercase().contains(trigger) {
            if let Some(re) = TRIGGER_MATCHERS.get(trigger) {
                result = re.replace_all(&result, replacement).into_owned();
            }
        }
    }
    result
}

/// Removes parenthetical self-referential annotations.
fn strip_meta_comments(text: &str) -> String {
    let mut result = text.to_string();
    for re in META_COMMENT_STRIP.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    result.trim().to_string()
}
