//! Gap analysis — compares a resume against JD keywords and the pattern
//! tables to produce a structured gap report.

use serde::{Deserialize, Serialize};

use crate::optimizer::keywords::extract_keywords;
use crate::optimizer::patterns::{MECHANICAL_PHRASES, WEAK_OPENERS};

/// Per-keyword density warning threshold: more occurrences than this is
/// flagged as a stuffing risk. Distinct from the whole-document check in the
/// output validator.
const KEYWORD_REPEAT_LIMIT: usize = 3;

/// Structured summary of keyword and phrasing deficiencies in a resume
/// relative to a job description. Built fresh per (resume, JD) pair and
/// never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGap {
    /// JD terms absent from the resume, in discovery order, deduplicated.
    pub missing: Vec<String>,
    /// Resume lines opening with a weak verb pattern.
    pub weak_phrasing: Vec<String>,
    /// Mechanical-phrase-table entries found verbatim (case-insensitive).
    pub mechanical_phrases: Vec<String>,
    /// Human-readable per-keyword density warnings.
    pub density_issues: Vec<String>,
}

/// Analyzes a resume against a job description.
pub fn analyze(resume: &str, job_description: &str) -> KeywordGap {
    let resume_lower = resume.to_lowercase();
    let jd_keywords = extract_keywords(job_description);

    let missing = jd_keywords
        .iter()
        .filter(|kw| !resume_lower.contains(&kw.to_lowercase()))
        .cloned()
        .collect();

    KeywordGap {
        missing,
        weak_phrasing: find_weak_phrasing(resume),
        mechanical_phrases: find_mechanical_phrases(&resume_lower),
        density_issues: check_density(&resume_lower, &jd_keywords),
    }
}

/// Resume lines whose trimmed content opens with a weak verb pattern.
fn find_weak_phrasing(text: &str) -> Vec<String> {
    let mut weak = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if WEAK_OPENERS.iter().any(|re| re.is_match(trimmed)) {
            weak.push(trimmed.to_string());
        }
    }
    weak
}

/// Mechanical-phrase-table entries present as case-insensitive substrings.
/// Expects the resume already lower-cased.
fn find_mechanical_phrases(resume_lower: &str) -> Vec<String> {
    MECHANICAL_PHRASES
        .iter()
        .filter(|phrase| resume_lower.contains(&phrase.to_lowercase()))
        .map(|phrase| phrase.to_string())
        .collect()
}

/// Counts non-overlapping case-insensitive occurrences of `needle` in
/// `haystack_lower` (already lower-cased).
fn count_occurrences(haystack_lower: &str, needle_lower: &str) -> usize {
    if needle_lower.is_empty() {
        return 0;
    }
    haystack_lower.matches(needle_lower).count()
}

fn check_density(resume_lower: &str, keywords: &[String]) -> Vec<String> {
    let mut issues = Vec::new();
    for keyword in keywords {
        let count = count_occurrences(resume_lower, &keyword.to_lowercase());
        if count > KEYWORD_REPEAT_LIMIT {
            issues.push(format!(
                "Keyword \"{keyword}\" repeated {count} times (risk of stuffing)"
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keyword_reported_when_absent_from_resume() {
        let gap = analyze(
            "I have experience with React",
            "We need React and CI/CD pipelines experience",
        );
        assert!(gap.missing.iter().any(|k| k == "CI/CD pipelines"));
    }

    #[test]
    fn test_keyword_present_case_insensitively_is_not_missing() {
        let gap = analyze(
            "Built ci/cd pipelines for three product teams",
            "We need CI/CD pipelines experience",
        );
        assert!(!gap.missing.iter().any(|k| k == "CI/CD pipelines"));
    }

    #[test]
    fn test_weak_phrasing_detects_line_openers() {
        let resume = "Senior Engineer\nResponsible for the payments service\nShipped v2";
        let gap = analyze(resume, "Looking for a payments engineer");
        assert_eq!(gap.weak_phrasing, vec!["Responsible for the payments service"]);
    }

    #[test]
    fn test_weak_opener_mid_line_is_ignored() {
        let resume = "I was Responsible for the payments service";
        let gap = analyze(resume, "Looking for a payments engineer");
        assert!(gap.weak_phrasing.is_empty());
    }

    #[test]
    fn test_mechanical_phrases_found_case_insensitively() {
        let resume = "Worked across teams To Mentor Team Members daily";
        let gap = analyze(resume, "Engineering role");
        assert!(gap
            .mechanical_phrases
            .iter()
            .any(|p| p == "to mentor team members"));
    }

    #[test]
    fn test_density_issue_emitted_above_repeat_limit() {
        let resume = "cloud deployment cloud deployment cloud deployment cloud deployment";
        let gap = analyze(resume, "Requires cloud deployment skills");
        assert!(gap
            .density_issues
            .iter()
            .any(|i| i.contains("cloud deployment") && i.contains('4')));
    }

    #[test]
    fn test_no_density_issue_at_exactly_the_limit() {
        let resume = "cloud deployment. cloud deployment. cloud deployment.";
        let gap = analyze(resume, "Requires cloud deployment skills");
        assert!(gap.density_issues.is_empty());
    }

    #[test]
    fn test_empty_inputs_do_not_panic() {
        let gap = analyze("", "");
        assert!(gap.missing.is_empty());
        assert!(gap.weak_phrasing.is_empty());
        assert!(gap.mechanical_phrases.is_empty());
        assert!(gap.density_issues.is_empty());
    }
}
