use serde::{Deserialize, Serialize};

use crate::types::{AnalysisResult, SentimentLabel};

/// Color classification for chart bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn from_score(score: f64) -> Self {
        SentimentLabel::from_score(score).into()
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Positive => "#34C759",
            Tone::Negative => "#FF3B30",
            Tone::Neutral => "#8E8E93",
        }
    }
}

impl From<SentimentLabel> for Tone {
    fn from(label: SentimentLabel) -> Self {
        match label {
            SentimentLabel::Positive => Tone::Positive,
            SentimentLabel::Negative => Tone::Negative,
            SentimentLabel::Neutral => Tone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub source: String,
    pub score: f64,
    pub title: String,
    pub tone: Tone,
    pub color: String,
}

pub fn chart_points(result: &AnalysisResult) -> Vec<ChartPoint> {
    result
        .articles
        .iter()
        .map(|article| {
            let tone = Tone::from_score(article.score());
            ChartPoint {
                source: article.source.clone(),
                score: article.score(),
                title: article.title.clone(),
                tone,
                color: tone.hex().to_string(),
            }
        })
        .collect()
}

/// Badge text, e.g. `positive: 0.8`. The label is classified from the
/// score with the same threshold as the chart tone, never taken from
/// whatever label the article carries.
pub fn badge_text(score: f64) -> String {
    format!("{}: {:.1}", SentimentLabel::from_score(score), score.abs())
}
