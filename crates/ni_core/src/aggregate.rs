use tracing::debug;

use crate::types::{AnalysisResult, Article, OverallSentiment};

impl AnalysisResult {
    /// Assembles a result from scored articles, deriving the overall
    /// sentiment and the top positive/negative articles.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let overall_sentiment = overall_sentiment(&articles);
        let top_positive = top_positive(&articles).cloned();
        let top_negative = top_negative(&articles).cloned();
        debug!(
            "Aggregated {} articles, overall {:.2} ({})",
            articles.len(),
            overall_sentiment.score,
            overall_sentiment.label
        );
        Self {
            articles,
            overall_sentiment,
            top_positive,
            top_negative,
            audio_url: None,
        }
    }
}

/// Mean article score with its label. An empty list is neutral at zero.
pub fn overall_sentiment(articles: &[Article]) -> OverallSentiment {
    let scores: Vec<f64> = articles
        .iter()
        .map(Article::score)
        .filter(|s| s.is_finite())
        .collect();
    if scores.is_empty() {
        return OverallSentiment::neutral();
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    OverallSentiment::from_score(mean)
}

/// Article with the highest score; the earliest one wins ties.
pub fn top_positive(articles: &[Article]) -> Option<&Article> {
    extreme_by(articles, |candidate, best| candidate > best)
}

/// Article with the lowest score; the earliest one wins ties.
pub fn top_negative(articles: &[Article]) -> Option<&Article> {
    extreme_by(articles, |candidate, best| candidate < best)
}

fn extreme_by(articles: &[Article], better: impl Fn(f64, f64) -> bool) -> Option<&Article> {
    let mut best: Option<&Article> = None;
    for article in articles {
        let replace = match best {
            None => true,
            Some(current) => {
                article.score().is_finite()
                    && (!current.score().is_finite() || better(article.score(), current.score()))
            }
        };
        if replace {
            best = Some(article);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Sentiment, SentimentLabel};

    fn article(title: &str, score: f64) -> Article {
        Article {
            title: title.to_string(),
            source: "test".to_string(),
            url: format!("http://test.com/{}", title),
            date: "2023-10-01".to_string(),
            summary: String::new(),
            sentiment: Sentiment::new(score, 0.5),
            content: None,
        }
    }

    #[test]
    fn test_empty_list() {
        let result = AnalysisResult::from_articles(vec![]);
        assert!(result.top_positive.is_none());
        assert!(result.top_negative.is_none());
        assert_eq!(result.overall_sentiment.score, 0.0);
        assert_eq!(result.overall_sentiment.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_extremes_are_extremal() {
        let articles = vec![
            article("a", 0.2),
            article("b", -0.7),
            article("c", 0.8),
            article("d", -0.1),
        ];
        let result = AnalysisResult::from_articles(articles);

        let top = result.top_positive.as_ref().unwrap();
        let bottom = result.top_negative.as_ref().unwrap();
        assert_eq!(top.title, "c");
        assert_eq!(bottom.title, "b");
        for a in &result.articles {
            assert!(top.score() >= a.score());
            assert!(bottom.score() <= a.score());
        }
    }

    #[test]
    fn test_ties_keep_first() {
        let articles = vec![article("first", 0.7), article("second", 0.7)];
        assert_eq!(top_positive(&articles).unwrap().title, "first");
        assert_eq!(top_negative(&articles).unwrap().title, "first");
    }

    #[test]
    fn test_single_article_is_both_extremes() {
        let result = AnalysisResult::from_articles(vec![article("only", -0.4)]);
        assert_eq!(result.top_positive.as_ref().unwrap().title, "only");
        assert_eq!(result.top_negative.as_ref().unwrap().title, "only");
    }

    #[test]
    fn test_overall_label_matches_score() {
        let cases = [
            vec![article("a", 0.8), article("b", 0.6)],
            vec![article("a", -0.8), article("b", -0.2)],
            vec![article("a", 0.8), article("b", -0.7)],
        ];
        for articles in cases {
            let overall = overall_sentiment(&articles);
            assert_eq!(overall.label, SentimentLabel::from_score(overall.score));
        }
    }

    #[test]
    fn test_mean() {
        let articles = vec![article("a", 0.5), article("b", -0.1)];
        let overall = overall_sentiment(&articles);
        assert!((overall.score - 0.2).abs() < 1e-9);
        assert_eq!(overall.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_non_finite_scores_do_not_win() {
        let mut broken = article("broken", 0.0);
        broken.sentiment.score = f64::NAN;
        let articles = vec![broken, article("ok", 0.4)];
        assert_eq!(top_positive(&articles).unwrap().title, "ok");
        assert_eq!(top_negative(&articles).unwrap().title, "ok");
        assert!((overall_sentiment(&articles).score - 0.4).abs() < 1e-9);
    }
}
