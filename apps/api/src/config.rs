use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a sensible local default; nothing is required.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_provider: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_provider: env_or("AI_PROVIDER", "ollama"),
            ollama_url: env_or("OLLAMA_URL", "http://127.0.0.1:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "phi3:mini"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
