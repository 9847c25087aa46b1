//! Pattern tables — static reference data consumed by the optimizer pipeline.
//!
//! These are closed-world lists, not general NLP: each table is explicit data
//! so new entries are additive and testable without touching the matching
//! logic that consumes them.

#![allow(dead_code)]

use std::sync::LazyLock;

use regex::Regex;

/// Priority of an exact phrase. Currently informational only — scoring does
/// not read it — but kept on the table for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A known high-value phrase that ATS systems tend to match verbatim.
#[derive(Debug, Clone, Copy)]
pub struct ExactPhrase {
    pub phrase: &'static str,
    pub priority: Priority,
}

/// High-value phrases checked verbatim against JDs and resumes.
pub const EXACT_PHRASES: &[ExactPhrase] = &[
    ExactPhrase { phrase: "CI/CD pipelines", priority: Priority::High },
    ExactPhrase { phrase: "cloud deployment", priority: Priority::High },
    ExactPhrase { phrase: "component-driven architecture", priority: Priority::High },
    ExactPhrase { phrase: "SEO best practices", priority: Priority::High },
    ExactPhrase { phrase: "scalable frontend systems", priority: Priority::High },
    ExactPhrase { phrase: "API integration", priority: Priority::High },
];

/// Filler phrases that signal unedited model output. Matched case-insensitively.
pub const MECHANICAL_PHRASES: &[&str] = &[
    "to mentor team members",
    "for comprehensive API integration",
    "to contribute to scalable frontend systems",
    "to highlight",
    "enhanced to highlight",
    "aligned to JD:",
];

/// Weak sentence openers paired with their stronger replacements.
/// Anchored at line start when applied.
pub const WEAK_VERB_REPLACEMENTS: &[(&str, &str)] = &[
    ("Experienced in", "Developed and implemented"),
    ("Responsible for", "Led and delivered"),
    ("Involved in", "Contributed to"),
    ("Participated in", "Collaborated on"),
    ("Familiar with", "Proficient in"),
];

/// Phrase-injection rules, ordered: (phrase marker, trigger term, replacement).
/// When a missing phrase contains the marker and the resume already contains
/// the trigger term, the trigger is upgraded to the replacement wording.
/// New rules are additive data, not new control flow.
pub const PHRASE_INJECTION_RULES: &[(&str, &str, &str)] = &[
    ("CI/CD", "deployment", "CI/CD pipelines and deployment"),
    ("cloud deployment", "deploying", "cloud deployment"),
    ("component-driven architecture", "component", "component-driven architecture"),
    ("SEO best practices", "seo", "SEO best practices"),
    ("scalable frontend systems", "scalable", "scalable frontend systems"),
    ("API integration", "api", "API integration"),
];

/// Looks up the injection rule for a missing phrase. Phrases with no rule
/// (or whose trigger is absent from the text) are left unintroduced.
pub fn injection_trigger(phrase: &str) -> Option<(&'static str, &'static str)> {
    PHRASE_INJECTION_RULES
        .iter()
        .find(|(marker, _, _)| phrase.contains(marker))
        .map(|(_, trigger, replacement)| (*trigger, *replacement))
}

/// Common English function words excluded from keyword extraction.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
    "by", "we", "are", "is", "you", "will", "should",
];

/// Runs of 2–4 lowercase words — the candidate shape for technical terms.
pub static TERM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z]+(?:\s+[a-z]+){1,3})\b").unwrap());

/// Line openers considered weak phrasing, anchored at the trimmed line start.
pub static WEAK_OPENERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    WEAK_VERB_REPLACEMENTS
        .iter()
        .map(|(weak, _)| Regex::new(&format!("^{}", regex::escape(weak))).unwrap())
        .collect()
});

/// Parenthetical self-referential annotations the model sometimes leaves in
/// rewritten text, e.g. "(enhanced to highlight leadership)".
pub static META_COMMENT_STRIP: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\([^)]*enhanced to highlight[^)]*\)",
        r"(?i)\([^)]*aligned to JD[^)]*\)",
        r"(?i)\([^)]*add metrics[^)]*\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Meta-comment detectors for the output validator. Broader than the strip
/// set: also catches "(improved to" which the transformer never emits.
pub static META_COMMENT_DETECT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        "(enhanced to highlight",
        "(aligned to JD",
        "(add metrics",
        "(improved to",
    ]
    .iter()
    .map(|p| Regex::new(&regex::escape(p)).unwrap())
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.iter().any(|s| s.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_weak_opener_compiles_and_anchors() {
        assert_eq!(WEAK_OPENERS.len(), WEAK_VERB_REPLACEMENTS.len());
        assert!(WEAK_OPENERS[0].is_match("Experienced in React"));
        assert!(!WEAK_OPENERS[0].is_match("Very Experienced in React"));
    }

    #[test]
    fn test_term_run_matches_two_to_four_words() {
        let caps: Vec<&str> = TERM_RUN
            .find_iter("distributed systems engineering work")
            .map(|m| m.as_str())
            .collect();
        assert!(!caps.is_empty());
    }

    #[test]
    fn test_stopword_lookup_is_case_insensitive() {
        assert!(is_stopword("The"));
        assert!(is_stopword("with"));
        assert!(!is_stopword("react"));
    }

    #[test]
    fn test_every_exact_phrase_has_an_injection_trigger() {
        for entry in EXACT_PHRASES {
            assert!(
                injection_trigger(entry.phrase).is_some(),
                "no trigger for {}",
                entry.phrase
            );
        }
    }

    #[test]
    fn test_meta_comment_strip_matches_case_insensitive() {
        assert!(META_COMMENT_STRIP[0].is_match("(Enhanced To Highlight python)"));
        assert!(META_COMMENT_STRIP[1].is_match("(aligned to jd: backend)"));
    }

    #[test]
    fn test_meta_comment_detect_matches_real_annotations() {
        assert!(META_COMMENT_DETECT[0].is_match("(enhanced to highlight Python)"));
        assert!(META_COMMENT_DETECT[1].is_match("Led the team (aligned to JD scope)"));
        assert!(META_COMMENT_DETECT[2].is_match("(add metrics here)"));
    }

    #[test]
    fn test_meta_comment_detect_covers_improved_to() {
        assert!(META_COMMENT_DETECT
            .iter()
            .any(|re| re.is_match("(improved to show impact)")));
    }
}
