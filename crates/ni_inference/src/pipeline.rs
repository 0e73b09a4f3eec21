use std::fmt;

use ni_core::narration::summary_text;
use ni_core::{AnalysisResult, CompanyName, Language, Result};
use tracing::debug;

use crate::models::Providers;

/// The two collaborator steps of a search; `SearchSession` sequences them.
pub struct AnalysisPipeline {
    providers: Providers,
    language: Language,
}

impl fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("analysis", &self.providers.analysis.name())
            .field("narration", &self.providers.narration.name())
            .field("language", &self.language)
            .finish()
    }
}

impl AnalysisPipeline {
    pub fn new(providers: Providers, language: Language) -> Self {
        Self { providers, language }
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Step one: fetch and aggregate.
    pub async fn fetch(&self, company: &CompanyName) -> Result<AnalysisResult> {
        self.providers.analysis.analyze(company).await
    }

    /// Step two: narrate the summary of a fetched result.
    pub async fn narrate(&self, company: &CompanyName, result: &AnalysisResult) -> Result<String> {
        let text = summary_text(company.as_str(), result, self.language);
        debug!("Narrating summary for {}: {}", company, text);
        self.providers.narration.narrate(&text, self.language).await
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ni_core::Error;

    use super::test_support::*;
    use super::*;
    use crate::models::mock::PLACEHOLDER_AUDIO_URL;

    fn acme() -> CompanyName {
        CompanyName::parse("Acme").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_then_narrate() {
        let pipeline = AnalysisPipeline::new(providers(ScriptedAnalysis::default(), None), Language::Hindi);
        let result = pipeline.fetch(&acme()).await.unwrap();
        assert!(result.articles[0].title.contains("Acme"));
        assert!(!result.has_audio());

        let audio_url = pipeline.narrate(&acme(), &result).await.unwrap();
        assert_eq!(audio_url, PLACEHOLDER_AUDIO_URL);
    }

    #[tokio::test]
    async fn test_narration_failure_is_recoverable() {
        let pipeline = AnalysisPipeline::new(
            providers(ScriptedAnalysis::default(), Some(Arc::new(FailingNarration))),
            Language::English,
        );
        let result = pipeline.fetch(&acme()).await.unwrap();
        let err = pipeline.narrate(&acme(), &result).await.unwrap_err();
        assert!(matches!(err, Error::Synthesis(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_backend_failure() {
        let analysis = ScriptedAnalysis {
            failing: vec!["Acme".to_string()],
            ..Default::default()
        };
        let pipeline = AnalysisPipeline::new(providers(analysis, None), Language::Hindi);
        let err = pipeline.fetch(&acme()).await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert!(!err.is_recoverable());
    }
}
