use std::sync::Arc;

use ni_core::{AnalysisProvider, Error, NarrationProvider, Result};
use tracing::info;

use crate::config::{Config, ProviderKind};

pub mod http;
pub mod mock;

pub use http::{HttpAnalysisProvider, HttpNarrationProvider};
pub use mock::{MockAnalysisProvider, MockNarrationProvider};

/// The pair of collaborators one search flow talks to.
#[derive(Debug, Clone)]
pub struct Providers {
    pub analysis: Arc<dyn AnalysisProvider>,
    pub narration: Arc<dyn NarrationProvider>,
}

pub fn create_providers(config: Option<Config>) -> Result<Providers> {
    let config = config.unwrap_or_default();
    config.validate()?;

    let providers = match config.provider {
        ProviderKind::Mock => Providers {
            analysis: Arc::new(MockAnalysisProvider::new(config.analysis_latency)),
            narration: Arc::new(MockNarrationProvider::new(config.narration_latency)),
        },
        ProviderKind::Http => {
            let backend_url = config
                .backend_url
                .clone()
                .ok_or_else(|| Error::Config("missing backend URL".to_string()))?;
            let narration_url = config
                .narration_url
                .clone()
                .ok_or_else(|| Error::Config("missing narration URL".to_string()))?;
            Providers {
                analysis: Arc::new(HttpAnalysisProvider::with_timeout(
                    backend_url,
                    config.api_key.clone(),
                    config.request_timeout,
                )?),
                narration: Arc::new(HttpNarrationProvider::with_timeout(
                    narration_url,
                    config.api_key.clone(),
                    config.request_timeout,
                )?),
            }
        }
    };

    info!(
        "🧠 Providers initialized (analysis: {}, narration: {})",
        providers.analysis.name(),
        providers.narration.name()
    );
    Ok(providers)
}
