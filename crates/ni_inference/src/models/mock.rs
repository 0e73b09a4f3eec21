use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ni_core::template::PLACEHOLDER_SUBJECT;
use ni_core::{
    AnalysisProvider, AnalysisResult, Article, CompanyName, Language, NarrationProvider, Result,
    Sentiment, SentimentLabel,
};
use tracing::info;

pub const PLACEHOLDER_AUDIO_URL: &str =
    "https://audio-samples.github.io/samples/mp3/blizzard_biased/sample-1.mp3";

// title, source, url, date, summary, score, magnitude, label
type TemplateRow = (&'static str, &'static str, &'static str, &'static str, &'static str, f64, f64, SentimentLabel);

const TEMPLATE_CORPUS: [TemplateRow; 10] = [
    (
        "Company X Reports Stellar Q3 Earnings, Exceeding Expectations",
        "Financial Times",
        "https://example.com/article1",
        "2023-11-05",
        "Company X announced record-breaking earnings for Q3, with revenue increasing by 25% year-over-year. The company's new product line contributed significantly to this growth.",
        0.8, 1.2, SentimentLabel::Positive,
    ),
    (
        "Analyst Downgrades Company X Stock Citing Supply Chain Concerns",
        "Wall Street Journal",
        "https://example.com/article2",
        "2023-11-03",
        "A leading market analyst has downgraded Company X's stock from 'buy' to 'hold' due to ongoing supply chain disruptions that could impact product availability during the holiday season.",
        -0.6, 0.9, SentimentLabel::Negative,
    ),
    (
        "Company X Launches New Sustainable Product Line",
        "TechCrunch",
        "https://example.com/article3",
        "2023-10-28",
        "Company X unveiled its new environmentally friendly product line, made from 100% recycled materials. This move aligns with the company's commitment to reduce its environmental footprint.",
        0.7, 1.0, SentimentLabel::Positive,
    ),
    (
        "Company X Faces Lawsuit Over Alleged Patent Infringement",
        "Reuters",
        "https://example.com/article4",
        "2023-10-25",
        "A competitor has filed a lawsuit against Company X, claiming intellectual property violations related to its flagship product. Company X denies all allegations.",
        -0.7, 1.1, SentimentLabel::Negative,
    ),
    (
        "Company X Partners with Tech Giant on New Initiative",
        "Bloomberg",
        "https://example.com/article5",
        "2023-10-20",
        "Company X announced a strategic partnership with a leading tech company to develop next-generation solutions for the healthcare industry. The multi-year agreement is valued at approximately $50 million.",
        0.6, 0.8, SentimentLabel::Positive,
    ),
    (
        "Company X CEO Discusses Future Plans in Interview",
        "CNBC",
        "https://example.com/article6",
        "2023-10-18",
        "In a recent interview, the CEO of Company X outlined the company's five-year strategic plan, including expansion into emerging markets and investment in R&D.",
        0.2, 0.5, SentimentLabel::Neutral,
    ),
    (
        "Regulatory Body Launches Investigation into Company X Practices",
        "The Guardian",
        "https://example.com/article7",
        "2023-10-15",
        "A government regulatory agency has initiated an investigation into Company X's data privacy practices following consumer complaints. The company states it is cooperating fully.",
        -0.5, 0.7, SentimentLabel::Negative,
    ),
    (
        "Company X Opens New Headquarters, Creating 500 Jobs",
        "Local News Network",
        "https://example.com/article8",
        "2023-10-10",
        "Company X has inaugurated its new headquarters, which will house over 1,000 employees. The expansion is expected to create approximately 500 new jobs in the region.",
        0.7, 0.9, SentimentLabel::Positive,
    ),
    (
        "Industry Analysis: Company X Market Position Remains Stable Despite Challenges",
        "Industry Today",
        "https://example.com/article9",
        "2023-10-05",
        "A comprehensive industry analysis indicates that Company X has maintained its market position despite increased competition and economic headwinds.",
        0.1, 0.4, SentimentLabel::Neutral,
    ),
    (
        "Company X Announces Delay in Product Release",
        "Tech News Daily",
        "https://example.com/article10",
        "2023-10-01",
        "Company X has postponed the release of its highly anticipated new product until Q1 of next year, citing quality control issues that need to be addressed.",
        -0.4, 0.6, SentimentLabel::Negative,
    ),
];

/// Template articles, newest first, with the placeholder subject in place.
pub fn template_articles() -> Vec<Article> {
    TEMPLATE_CORPUS
        .iter()
        .map(|&(title, source, url, date, summary, score, magnitude, label)| Article {
            title: title.to_string(),
            source: source.to_string(),
            url: url.to_string(),
            date: date.to_string(),
            summary: summary.to_string(),
            sentiment: Sentiment::labeled(score, magnitude, label),
            content: None,
        })
        .collect()
}

pub struct MockAnalysisProvider {
    templates: Vec<Article>,
    latency: Duration,
}

impl fmt::Debug for MockAnalysisProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockAnalysisProvider")
            .field("templates", &self.templates.len())
            .field("latency", &self.latency)
            .finish()
    }
}

impl MockAnalysisProvider {
    pub fn new(latency: Duration) -> Self {
        Self::with_templates(template_articles(), latency)
    }

    /// A provider over a custom corpus; titles and summaries may use the
    /// placeholder subject.
    pub fn with_templates(templates: Vec<Article>, latency: Duration) -> Self {
        Self { templates, latency }
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn analyze(&self, company: &CompanyName) -> Result<AnalysisResult> {
        info!("📰 Fetching news analysis for {}", company);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let articles = self
            .templates
            .iter()
            .map(|article| article.with_subject(PLACEHOLDER_SUBJECT, company.as_str()))
            .collect();
        Ok(AnalysisResult::from_articles(articles))
    }
}

#[derive(Debug)]
pub struct MockNarrationProvider {
    audio_url: String,
    latency: Duration,
}

impl MockNarrationProvider {
    pub fn new(latency: Duration) -> Self {
        Self {
            audio_url: PLACEHOLDER_AUDIO_URL.to_string(),
            latency,
        }
    }
}

#[async_trait]
impl NarrationProvider for MockNarrationProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn narrate(&self, text: &str, language: Language) -> Result<String> {
        info!("🔊 Generating narration ({} chars) in {}", text.chars().count(), language);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.audio_url.clone())
    }
}
