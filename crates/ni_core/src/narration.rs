use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::AnalysisResult;
use crate::{Error, Result};

/// Narration languages with a summary template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::English => "en",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hi" | "hindi" => Ok(Language::Hindi),
            "en" | "english" => Ok(Language::English),
            other => Err(Error::Input(format!("Unsupported narration language: {}", other))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Short spoken summary of a result, handed to the narration provider.
pub fn summary_text(company: &str, result: &AnalysisResult, language: Language) -> String {
    let count = result.articles.len();
    let label = result.overall_sentiment.label;
    let score = result.overall_sentiment.score;
    match language {
        Language::Hindi => format!(
            "{} की समाचार विश्लेषण के अनुसार, कुल {} लेख प्राप्त हुए। समग्र भावना {} है, जिसका स्कोर {:.2} है।",
            company, count, label, score
        ),
        Language::English => format!(
            "Based on the analysis of {} recent news articles about {}, the overall sentiment is {} with a score of {:.2}.",
            count, company, label, score
        ),
    }
}
