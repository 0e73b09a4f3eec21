use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Scores at or above this value read as positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;
/// Scores at or below this value read as negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Shared threshold policy used by badges, chart tones and the overall label.
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() {
            Self::Neutral
        } else if score >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub magnitude: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    /// Builds a sentiment whose label follows the threshold policy.
    pub fn new(score: f64, magnitude: f64) -> Self {
        let score = if score.is_finite() { score.clamp(-1.0, 1.0) } else { 0.0 };
        let magnitude = if magnitude.is_finite() { magnitude.max(0.0) } else { 0.0 };
        Self {
            score,
            magnitude,
            label: SentimentLabel::from_score(score),
        }
    }

    /// Builds a sentiment with a pre-assigned label, as template data carries.
    pub fn labeled(score: f64, magnitude: f64, label: SentimentLabel) -> Self {
        Self { score, magnitude, label }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub source: String,
    pub url: String,
    pub date: String,
    pub summary: String,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Article {
    pub fn score(&self) -> f64 {
        self.sentiment.score
    }

    /// Publication date, when `date` is an ISO calendar date.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        let day = date.get(..10).unwrap_or(date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallSentiment {
    pub score: f64,
    pub label: SentimentLabel,
}

impl OverallSentiment {
    pub fn from_score(score: f64) -> Self {
        Self {
            score,
            label: SentimentLabel::from_score(score),
        }
    }

    pub fn neutral() -> Self {
        Self::from_score(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub articles: Vec<Article>,
    pub overall_sentiment: OverallSentiment,
    pub top_positive: Option<Article>,
    pub top_negative: Option<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl AnalysisResult {
    pub fn with_audio(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }

    pub fn has_audio(&self) -> bool {
        self.audio_url.is_some()
    }
}

/// A company name that passed the blank check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(Error::Input("company name must not be empty".to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(date: &str) -> Article {
        Article {
            title: "Test Article".to_string(),
            source: "test".to_string(),
            url: "http://test.com".to_string(),
            date: date.to_string(),
            summary: "A test article.".to_string(),
            sentiment: Sentiment::new(0.1, 0.2),
            content: None,
        }
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(SentimentLabel::from_score(0.3), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.29), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.3), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.29), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(f64::NAN), SentimentLabel::Neutral);
    }

    #[test]
    fn test_sentiment_new_clamps() {
        let s = Sentiment::new(1.7, -2.0);
        assert_eq!(s.score, 1.0);
        assert_eq!(s.magnitude, 0.0);
        assert_eq!(s.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_company_name_rejects_blank() {
        assert!(matches!(CompanyName::parse(""), Err(Error::Input(_))));
        assert!(matches!(CompanyName::parse("   \t"), Err(Error::Input(_))));
        assert_eq!(CompanyName::parse("  Acme ").unwrap().as_str(), "Acme");
    }

    #[test]
    fn test_published_on() {
        assert_eq!(
            article("2023-11-05").published_on(),
            NaiveDate::from_ymd_opt(2023, 11, 5)
        );
        assert_eq!(
            article("2023-11-05T10:00:00Z").published_on(),
            NaiveDate::from_ymd_opt(2023, 11, 5)
        );
        assert_eq!(article("last week").published_on(), None);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let result = AnalysisResult {
            articles: vec![],
            overall_sentiment: OverallSentiment::neutral(),
            top_positive: None,
            top_negative: None,
            audio_url: Some("http://audio".to_string()),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallSentiment"]["label"], "neutral");
        assert!(json["topPositive"].is_null());
        assert_eq!(json["audioUrl"], "http://audio");
    }
}
