//! Application state and service initialization
//!
//! This module centralizes service construction so handlers receive fully
//! built services and tests can swap the completion provider.

use std::sync::Arc;

use actix_web::web;

use crate::model::{Config, LimitsConfig};
use crate::service::{CompletionProvider, CrisisPlanService, OpenRouterClient, TreatyAnalysisService};

/// Application state containing all services and shared resources
#[derive(Clone)]
pub struct AppState {
    /// Treaty compliance analysis service
    pub treaty_service: web::Data<TreatyAnalysisService>,
    /// Crisis operational order service
    pub crisis_service: web::Data<CrisisPlanService>,
    /// Request size limits
    pub limits: web::Data<LimitsConfig>,
}

impl AppState {
    /// Build every service from the resolved configuration
    ///
    /// A missing API key is not an error: the services then run fallback-only.
    /// Malformed CORS origins and provider URLs are.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        config.validate_origins().map_err(AppError::InvalidConfig)?;

        let client = OpenRouterClient::new(&config.provider)
            .map_err(|e| AppError::InvalidConfig(e.to_string()))?;

        if config.provider.api_key.is_none() {
            tracing::warn!("OPENROUTER_API_KEY not set, serving deterministic fallback reports only");
        }

        Ok(Self::with_provider(Arc::new(client), config))
    }

    /// Build state around an arbitrary completion provider
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, config: &Config) -> Self {
        Self {
            treaty_service: web::Data::new(TreatyAnalysisService::new(
                Arc::clone(&provider),
                config.quality,
            )),
            crisis_service: web::Data::new(CrisisPlanService::new(provider, config.quality)),
            limits: web::Data::new(config.limits),
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
