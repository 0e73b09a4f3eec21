pub mod aggregate;
pub mod chart;
pub mod error;
pub mod models;
pub mod narration;
pub mod query;
pub mod state;
pub mod template;
pub mod types;

pub use error::{Error, Result};
pub use models::{AnalysisProvider, NarrationProvider};
pub use narration::Language;
pub use types::{
    AnalysisResult, Article, CompanyName, OverallSentiment, Sentiment, SentimentLabel,
};
