use async_trait::async_trait;
use std::fmt;

use crate::narration::Language;
use crate::types::{AnalysisResult, CompanyName};
use crate::Result;

#[async_trait]
pub trait AnalysisProvider: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Fetch scored news for a company and aggregate it.
    async fn analyze(&self, company: &CompanyName) -> Result<AnalysisResult>;
}

#[async_trait]
pub trait NarrationProvider: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Synthesize `text` and return a reference to the audio asset.
    async fn narrate(&self, text: &str, language: Language) -> Result<String>;
}
