use serde::{Deserialize, Serialize};

use crate::types::{AnalysisResult, SentimentLabel};

pub const EXAMPLE_QUESTIONS: [&str; 3] = [
    "What is the main positive news?",
    "Summarize the negative articles",
    "When was the most recent article published?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    TopPositive,
    Negative,
    MostRecent,
    Overview,
}

impl QueryKind {
    /// Keyword classification of a free-form question.
    pub fn classify(question: &str) -> Self {
        let q = question.to_lowercase();
        if q.contains("positive") {
            QueryKind::TopPositive
        } else if q.contains("negative") {
            QueryKind::Negative
        } else if ["recent", "latest", "newest"].iter().any(|w| q.contains(w)) {
            QueryKind::MostRecent
        } else {
            QueryKind::Overview
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub kind: QueryKind,
    pub answer: String,
}

pub fn answer(result: &AnalysisResult, question: &str) -> QueryAnswer {
    let kind = QueryKind::classify(question);
    let answer = match kind {
        QueryKind::TopPositive => match &result.top_positive {
            Some(article) => format!("{} ({}): {}", article.title, article.source, article.summary),
            None => "No articles were found.".to_string(),
        },
        QueryKind::Negative => {
            let titles: Vec<String> = result
                .articles
                .iter()
                .filter(|a| a.sentiment.label == SentimentLabel::Negative)
                .map(|a| format!("- {} ({})", a.title, a.source))
                .collect();
            if titles.is_empty() {
                "No negative articles were found.".to_string()
            } else {
                format!("{} negative articles:\n{}", titles.len(), titles.join("\n"))
            }
        }
        QueryKind::MostRecent => {
            let latest = result
                .articles
                .iter()
                .filter_map(|a| a.published_on().map(|d| (d, a)))
                .fold(None, |best: Option<(_, _)>, (d, a)| match best {
                    Some((bd, _)) if bd >= d => best,
                    _ => Some((d, a)),
                });
            match latest {
                Some((date, article)) => format!(
                    "The most recent article was published on {}: {}",
                    date.format("%Y-%m-%d"),
                    article.title
                ),
                None => "No dated articles were found.".to_string(),
            }
        }
        QueryKind::Overview => format!(
            "{} articles analyzed; the overall sentiment is {} with a score of {:.2}.",
            result.articles.len(),
            result.overall_sentiment.label,
            result.overall_sentiment.score
        ),
    };
    QueryAnswer { kind, answer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Article, Sentiment};

    fn article(title: &str, date: &str, score: f64) -> Article {
        Article {
            title: title.to_string(),
            source: "Wire".to_string(),
            url: "http://test.com".to_string(),
            date: date.to_string(),
            summary: format!("{} summary", title),
            sentiment: Sentiment::new(score, 0.5),
            content: None,
        }
    }

    fn result() -> AnalysisResult {
        AnalysisResult::from_articles(vec![
            article("Older good news", "2023-10-01", 0.9),
            article("Newest bad news", "2023-11-05", -0.6),
            article("Middle bad news", "2023-10-20", -0.4),
        ])
    }

    #[test]
    fn test_example_questions_classify() {
        let kinds: Vec<_> = EXAMPLE_QUESTIONS.iter().map(|q| QueryKind::classify(q)).collect();
        assert_eq!(
            kinds,
            vec![QueryKind::TopPositive, QueryKind::Negative, QueryKind::MostRecent]
        );
        assert_eq!(QueryKind::classify("How is it going?"), QueryKind::Overview);
    }

    #[test]
    fn test_answers() {
        let r = result();
        assert!(answer(&r, EXAMPLE_QUESTIONS[0]).answer.starts_with("Older good news"));

        let negative = answer(&r, EXAMPLE_QUESTIONS[1]).answer;
        assert!(negative.starts_with("2 negative articles"));
        assert!(negative.contains("Middle bad news"));

        let recent = answer(&r, EXAMPLE_QUESTIONS[2]).answer;
        assert!(recent.contains("2023-11-05"));
        assert!(recent.contains("Newest bad news"));
    }

    #[test]
    fn test_empty_result() {
        let r = AnalysisResult::from_articles(vec![]);
        assert_eq!(answer(&r, "positive?").answer, "No articles were found.");
        assert_eq!(answer(&r, "latest?").answer, "No dated articles were found.");
    }
}
