pub mod config;
pub mod models;
pub mod pipeline;
pub mod session;

pub use config::{Config, ProviderKind};
pub use models::{create_providers, Providers};
pub use pipeline::AnalysisPipeline;
pub use session::SearchSession;

pub mod prelude {
    pub use super::config::{Config, ProviderKind};
    pub use super::models::create_providers;
    pub use super::pipeline::AnalysisPipeline;
    pub use super::session::SearchSession;
    pub use ni_core::{AnalysisResult, Article, Error, Language, Result};
}
