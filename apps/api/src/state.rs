use std::sync::Arc;

use crate::config::Config;
use crate::provider::AiProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Kept on state for handlers that need runtime settings.
    #[allow(dead_code)]
    pub config: Config,
    /// Pluggable generation backend. Selected once at startup via AI_PROVIDER.
    pub provider: Arc<dyn AiProvider>,
}
