//! Axum route handlers for the optimize API.
//!
//! The handlers are the "caller" in the core's contract: they enforce the
//! minimum input length before anything reaches the pipelines, and they map
//! pipeline errors to a single user-facing message via `AppError`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::optimizer::gap::{self, KeywordGap};
use crate::optimizer::score;
use crate::optimizer::transform;
use crate::optimizer::validate::{self, ValidationResult};
use crate::provider::OptimizeInput;
use crate::schema::GenerationRecord;
use crate::state::AppState;

/// Minimum length for both input documents, in characters.
const MIN_INPUT_CHARS: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub data: GenerationRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalOptimizeResponse {
    pub optimized_text: String,
    pub validation: ValidationResult,
    pub score: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub gap: KeywordGap,
    pub score: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/optimize
///
/// Pipeline A: sends both documents to the generation backend and returns
/// the schema-validated record.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    validate_input(&request)?;

    let input = OptimizeInput {
        resume_text: request.resume_text,
        job_description: request.job_description,
    };

    let data = state.provider.optimize_resume(&input).await?;

    info!("optimize succeeded: score={}", data.score);

    Ok(Json(OptimizeResponse { data }))
}

/// POST /api/v1/optimize/local
///
/// Pipeline B: deterministic rewrite with no model call. Returns the
/// optimized text, the quality-gate verdict against the original, and the
/// ATS score of the optimized text.
pub async fn handle_optimize_local(
    State(_state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<LocalOptimizeResponse>, AppError> {
    validate_input(&request)?;

    let optimized_text = transform::optimize(&request.resume_text, &request.job_description);
    let validation = validate::validate(&request.resume_text, &optimized_text);
    let score = score::calculate(&optimized_text, &request.job_description);

    info!(
        "local optimize: score={} passed={}",
        score, validation.passed
    );

    Ok(Json(LocalOptimizeResponse {
        optimized_text,
        validation,
        score,
    }))
}

/// POST /api/v1/analyze
///
/// Gap report and score only; no rewrite.
pub async fn handle_analyze(
    State(_state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_input(&request)?;

    let gap = gap::analyze(&request.resume_text, &request.job_description);
    let score = score::calculate(&request.resume_text, &request.job_description);

    Ok(Json(AnalyzeResponse { gap, score }))
}

fn validate_input(request: &OptimizeRequest) -> Result<(), AppError> {
    if request.resume_text.chars().count() < MIN_INPUT_CHARS {
        return Err(AppError::Validation(format!(
            "Resume is too short (minimum {MIN_INPUT_CHARS} characters)"
        )));
    }
    if request.job_description.chars().count() < MIN_INPUT_CHARS {
        return Err(AppError::Validation(format!(
            "Job description is too short (minimum {MIN_INPUT_CHARS} characters)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resume: &str, jd: &str) -> OptimizeRequest {
        OptimizeRequest {
            resume_text: resume.to_string(),
            job_description: jd.to_string(),
        }
    }

    #[test]
    fn test_short_resume_rejected() {
        let err = validate_input(&request("too short", &"x".repeat(60))).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Resume")));
    }

    #[test]
    fn test_short_jd_rejected() {
        let err = validate_input(&request(&"x".repeat(60), "too short")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Job description")));
    }

    #[test]
    fn test_fifty_chars_is_enough() {
        assert!(validate_input(&request(&"x".repeat(50), &"y".repeat(50))).is_ok());
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: OptimizeRequest = serde_json::from_str(
            r#"{"resumeText": "abc", "jobDescription": "def"}"#,
        )
        .unwrap();
        assert_eq!(request.resume_text, "abc");
        assert_eq!(request.job_description, "def");
    }
}
