//! ATS score — a deterministic 0–100 fit score from keyword coverage,
//! exact-phrase bonuses, and filler/meta penalties. No model call involved.

use crate::optimizer::gap;
use crate::optimizer::keywords::extract_keywords;
use crate::optimizer::patterns::EXACT_PHRASES;

const EXACT_PHRASE_BONUS: f64 = 5.0;
const MECHANICAL_PHRASE_PENALTY: f64 = 3.0;
const META_COMMENT_PENALTY: f64 = 5.0;

/// Computes the ATS fit score for a resume against a job description.
/// Zero extracted keywords yields a base of 0, not a division by zero.
pub fn calculate(resume: &str, job_description: &str) -> u8 {
    let gap = gap::analyze(resume, job_description);
    let jd_keywords = extract_keywords(job_description);
    let resume_lower = resume.to_lowercase();

    let total = jd_keywords.len();
    let matched = total - gap.missing.len();

    let mut score = if total > 0 {
        (matched as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    for entry in EXACT_PHRASES {
        if resume_lower.contains(&entry.phrase.to_lowercase()) {
            score += EXACT_PHRASE_BONUS;
        }
    }

    score -= gap.mechanical_phrases.len() as f64 * MECHANICAL_PHRASE_PENALTY;

    if resume.contains("(enhanced to highlight") || resume.contains("(aligned to JD") {
        score -= META_COMMENT_PENALTY;
    }

    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_clamp_at_100() {
        let text = "Senior engineer building cloud deployment and API integration \
                    systems with CI/CD pipelines across scalable frontend systems";
        let score = calculate(text, text);
        // Base is 100 (every keyword matched); phrase bonuses push past the
        // cap and must clamp.
        assert_eq!(score, 100);
    }

    #[test]
    fn test_zero_keywords_yields_zero_base() {
        assert_eq!(calculate("anything at all", ""), 0);
    }

    #[test]
    fn test_mechanical_phrases_reduce_score() {
        let jd = "Looking for cloud deployment experience in production";
        let clean = "Deep cloud deployment experience in production environments";
        let mechanical = format!("{clean} enhanced to highlight to mentor team members");
        assert!(calculate(&mechanical, jd) < calculate(clean, jd));
    }

    #[test]
    fn test_meta_comment_flat_penalty() {
        let jd = "Looking for cloud deployment experience in production";
        let clean = "Deep cloud deployment experience in production environments";
        let annotated = format!("{clean} (aligned to JD requirements)");
        assert_eq!(
            calculate(clean, jd).saturating_sub(calculate(&annotated, jd)),
            5
        );
    }

    #[test]
    fn test_score_never_negative() {
        let resume = "to highlight enhanced to highlight aligned to JD: \
                      to mentor team members (enhanced to highlight nothing)";
        let score = calculate(resume, "Completely unrelated quantum chemistry role");
        assert_eq!(score, 0);
    }

    #[test]
    fn test_deterministic() {
        let resume = "Built services with API integration";
        let jd = "Needs API integration and cloud deployment";
        assert_eq!(calculate(resume, jd), calculate(resume, jd));
    }
}
