//! Provider seam — the generation-backend boundary.
//!
//! `AiProvider` is the trait the HTTP layer talks to; the concrete backend
//! is selected once at startup from config and carried in `AppState` as
//! `Arc<dyn AiProvider>`. Whatever text the backend returns, well-formed or
//! not, goes through extraction → repair → schema validation before anything
//! downstream may touch it.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::extraction::{extract_candidate, parse_repaired};
use crate::llm_client::prompts::{build_optimize_prompt, OPTIMIZE_SYSTEM, RESULT_SCHEMA_HINT};
use crate::llm_client::LlmClient;
use crate::schema::{self, GenerationRecord};

/// Inputs to one optimize call. Length validation happens at the HTTP
/// boundary before construction; the pipeline itself tolerates any string.
#[derive(Debug, Clone)]
pub struct OptimizeInput {
    pub resume_text: String,
    pub job_description: String,
}

/// A generation backend that turns a (resume, JD) pair into a validated
/// record. Implementations own their prompting; callers own retries.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn optimize_resume(&self, input: &OptimizeInput) -> Result<GenerationRecord, AppError>;
}

/// Selects the provider backend from config. Unknown `AI_PROVIDER` values
/// are a startup error, not a silent fallback.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn AiProvider>> {
    match config.ai_provider.as_str() {
        "ollama" => {
            info!(
                "AI provider: ollama ({} at {})",
                config.ollama_model, config.ollama_url
            );
            Ok(Arc::new(OllamaProvider::new(LlmClient::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))))
        }
        other => bail!("Unknown AI_PROVIDER: {other}"),
    }
}

/// Ollama-backed provider: one generate call, then pipeline A on the blob.
pub struct OllamaProvider {
    llm: LlmClient,
}

impl OllamaProvider {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiProvider for OllamaProvider {
    async fn optimize_resume(&self, input: &OptimizeInput) -> Result<GenerationRecord, AppError> {
        let prompt = build_optimize_prompt(&input.resume_text, &input.job_description);

        let raw = self
            .llm
            .generate(&prompt, OPTIMIZE_SYSTEM, RESULT_SCHEMA_HINT)
            .await
            .map_err(|e| AppError::Llm(format!("generation call failed: {e}")))?;

        record_from_raw(&raw)
    }
}

/// Pipeline A: raw model output → candidate span → (repaired) parse →
/// schema-validated record. Every failure is terminal for this invocation;
/// retry-with-a-new-prompt is the caller's decision.
pub fn record_from_raw(raw: &str) -> Result<GenerationRecord, AppError> {
    let candidate = extract_candidate(raw).map_err(|e| {
        warn!("extraction failed: {e}");
        AppError::Llm(e.to_string())
    })?;

    let value = parse_repaired(&candidate).map_err(|e| {
        // The error message carries the diagnostic snippet; it is logged by
        // the error layer and never reaches the client.
        AppError::Llm(e.to_string())
    })?;

    schema::validate(&value).map_err(|e| AppError::Llm(e.to_string()))
}
