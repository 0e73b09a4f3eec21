use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ni_core::{
    AnalysisProvider, AnalysisResult, Article, CompanyName, Error, Language, NarrationProvider, Result,
    Sentiment,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_REQUEST_TIMEOUT;

/// Only the articles are taken from the backend; the aggregate is derived locally.
#[derive(Deserialize)]
struct AnalysisPayload {
    articles: Vec<Article>,
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesisResponse {
    audio_url: String,
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else {
        e.to_string()
    }
}

fn backend_error(e: reqwest::Error) -> Error {
    Error::Backend(describe(&e))
}

fn synthesis_error(e: reqwest::Error) -> Error {
    Error::Synthesis(describe(&e))
}

fn client(timeout: Duration) -> Result<Arc<Client>> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map(Arc::new)
        .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Scores outside [-1, 1] are clamped and the label re-derived from the
/// clamped score.
fn normalize(mut article: Article) -> Article {
    let Sentiment { score, magnitude, .. } = article.sentiment;
    if !(-1.0..=1.0).contains(&score) {
        warn!("Clamping out-of-range score {} of \"{}\"", score, article.title);
    }
    article.sentiment = Sentiment::new(score, magnitude);
    article
}

/// News/sentiment backend reached over HTTP.
pub struct HttpAnalysisProvider {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl HttpAnalysisProvider {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for HttpAnalysisProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAnalysisProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisProvider {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn analyze(&self, company: &CompanyName) -> Result<AnalysisResult> {
        info!("📰 Requesting news analysis for {} from {}", company, self.base_url);
        let mut request = self
            .client
            .get(format!("{}/analysis", self.base_url))
            .query(&[("company", company.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(backend_error)?
            .error_for_status()
            .map_err(backend_error)?
            .json::<AnalysisPayload>()
            .await
            .map_err(backend_error)?;

        debug!("Backend returned {} articles, re-deriving aggregate", response.articles.len());
        let articles = response.articles.into_iter().map(normalize).collect();
        Ok(AnalysisResult::from_articles(articles))
    }
}

/// Speech synthesis backend reached over HTTP.
pub struct HttpNarrationProvider {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl HttpNarrationProvider {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: client(timeout)?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for HttpNarrationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpNarrationProvider")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl NarrationProvider for HttpNarrationProvider {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn narrate(&self, text: &str, language: Language) -> Result<String> {
        info!("🔊 Requesting narration in {} from {}", language, self.base_url);
        let body = SynthesisRequest {
            text,
            language: language.code(),
        };
        let mut request = self
            .client
            .post(format!("{}/synthesize", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(synthesis_error)?
            .error_for_status()
            .map_err(synthesis_error)?
            .json::<SynthesisResponse>()
            .await
            .map_err(synthesis_error)?;

        if response.audio_url.trim().is_empty() {
            return Err(Error::Synthesis("backend returned an empty audio URL".to_string()));
        }
        Ok(response.audio_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let provider = HttpAnalysisProvider::new("http://localhost:9000/", Some("secret".into())).unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("http://localhost:9000\""));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_backend_error() {
        // Port 9 (discard) is not expected to serve HTTP.
        let provider = HttpAnalysisProvider::new("http://127.0.0.1:9", None).unwrap();
        let company = CompanyName::parse("Acme").unwrap();
        let err = provider.analyze(&company).await.unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }

    #[tokio::test]
    async fn test_unreachable_tts_is_synthesis_error() {
        let provider = HttpNarrationProvider::new("http://127.0.0.1:9", None).unwrap();
        let err = provider.narrate("hello", Language::English).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_analysis_payload_ignores_backend_aggregate() {
        let payload: AnalysisPayload = serde_json::from_str(
            r#"{
                "articles": [{
                    "title": "Acme wins",
                    "source": "Wire",
                    "url": "https://example.com/1",
                    "date": "2023-11-05",
                    "summary": "Acme won.",
                    "sentiment": {"score": 0.9, "magnitude": 1.0, "label": "positive"}
                }],
                "overallSentiment": {"score": -1.0, "label": "negative"},
                "topPositive": null,
                "topNegative": null
            }"#,
        )
        .unwrap();
        let result = AnalysisResult::from_articles(payload.articles);
        assert_eq!(result.overall_sentiment.label, ni_core::SentimentLabel::Positive);
        assert_eq!(result.top_positive.as_ref().unwrap().title, "Acme wins");
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let payload: AnalysisPayload = serde_json::from_str(
            r#"{
                "articles": [
                    {"title": "Up", "source": "Wire", "url": "u1", "date": "2023-11-05",
                     "summary": "", "sentiment": {"score": 3.0, "magnitude": 1.0, "label": "negative"}},
                    {"title": "Flat", "source": "Wire", "url": "u2", "date": "2023-11-04",
                     "summary": "", "sentiment": {"score": 0.5, "magnitude": -2.0, "label": "positive"}}
                ]
            }"#,
        )
        .unwrap();
        let articles: Vec<Article> = payload.articles.into_iter().map(normalize).collect();
        assert_eq!(articles[0].score(), 1.0);
        assert_eq!(articles[0].sentiment.label, ni_core::SentimentLabel::Positive);
        assert_eq!(articles[1].sentiment.magnitude, 0.0);

        let result = AnalysisResult::from_articles(articles);
        assert!((result.overall_sentiment.score - 0.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_silent_backend_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections and never answer.
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let base = format!("http://{}", addr);
        let timeout = Duration::from_millis(200);
        let company = CompanyName::parse("Acme").unwrap();
        let analysis = HttpAnalysisProvider::with_timeout(&base, None, timeout).unwrap();
        match analysis.analyze(&company).await {
            Err(Error::Backend(message)) => assert!(message.contains("timed out"), "{}", message),
            other => panic!("expected a backend timeout, got {:?}", other),
        }

        let narration = HttpNarrationProvider::with_timeout(&base, None, timeout).unwrap();
        let err = narration.narrate("hello", Language::English).await.unwrap_err();
        assert!(matches!(err, Error::Synthesis(_)));
        server.abort();
    }

    #[test]
    fn test_synthesis_response_format() {
        let response: SynthesisResponse =
            serde_json::from_str(r#"{"audioUrl":"https://cdn/a.mp3"}"#).unwrap();
        assert_eq!(response.audio_url, "https://cdn/a.mp3");
    }
}
