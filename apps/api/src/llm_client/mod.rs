/// LLM Client — the single point of entry for all generation-backend calls.
///
/// ARCHITECTURAL RULE: No other module may call the Ollama API directly.
/// All model interactions MUST go through this module. The client returns
/// the raw text blob; extraction/repair/validation of that blob is the
/// pipeline's job, never the client's.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GENERATE_PATH: &str = "/api/generate";
/// Low temperature: we want schema-shaped JSON, not creative prose.
const TEMPERATURE: f32 = 0.2;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("backend unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for the Ollama `/api/generate` endpoint, with bounded retry on
/// transient failures (connection errors and 5xx).
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }

    /// Builds the single prompt string: system instructions, schema hint,
    /// user content, and the JSON-only reminder.
    fn full_prompt(system: &str, prompt: &str, schema_hint: &str) -> String {
        [
            format!("SYSTEM:\n{system}"),
            format!("\nOUTPUT JSON SCHEMA (MUST MATCH):\n{schema_hint}"),
            format!("\nUSER:\n{prompt}"),
            "\nReturn ONLY valid JSON. No markdown. No extra text.".to_string(),
        ]
        .join("\n")
    }

    /// Calls the generation backend and returns the raw response text.
    /// Retries on connection errors and 5xx with exponential backoff.
    pub async fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema_hint: &str,
    ) -> Result<String, LlmError> {
        let full_prompt = Self::full_prompt(system, prompt, schema_hint);
        let request_body = GenerateRequest {
            model: &self.model,
            prompt: &full_prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
            },
        };

        let url = self.generate_url();
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "generation call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Ollama returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let generated: GenerateResponse = response.json().await?;

            if generated.response.trim().is_empty() {
                return Err(LlmError::EmptyContent);
            }

            debug!(
                "generation call succeeded: {} chars returned",
                generated.response.len()
            );

            return Ok(generated.response);
        }

        Err(last_error.unwrap_or(LlmError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_prompt_layout() {
        let prompt = LlmClient::full_prompt("SYS", "USER CONTENT", "{\"type\":\"object\"}");
        assert!(prompt.starts_with("SYSTEM:\nSYS"));
        assert!(prompt.contains("OUTPUT JSON SCHEMA (MUST MATCH):"));
        assert!(prompt.contains("USER:\nUSER CONTENT"));
        assert!(prompt.ends_with("Return ONLY valid JSON. No markdown. No extra text."));
    }

    #[test]
    fn test_generate_url_normalizes_trailing_slash() {
        let client = LlmClient::new(
            "http://127.0.0.1:11434/".to_string(),
            "phi3:mini".to_string(),
        );
        assert_eq!(client.generate_url(), "http://127.0.0.1:11434/api/generate");
        assert_eq!(client.model(), "phi3:mini");
    }
}
