use std::fmt::Write;

use ni_core::chart::{badge_text, chart_points};
use ni_core::query::EXAMPLE_QUESTIONS;
use ni_core::state::{Notice, View};
use ni_core::AnalysisResult;

const HALF_WIDTH: usize = 20;

pub fn summary_card(company: &str, result: &AnalysisResult) -> String {
    let overall = result.overall_sentiment;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "News Sentiment Summary: {} [{}]",
        company,
        badge_text(overall.score)
    );
    let _ = writeln!(
        out,
        "Based on the analysis of {} recent news articles about {}, the overall sentiment is {} with a score of {:.2}.",
        result.articles.len(),
        company,
        overall.label,
        overall.score
    );
    if let Some(article) = &result.top_positive {
        let _ = writeln!(
            out,
            "\nMost Positive Article [{}]\n  {}\n  {}",
            badge_text(article.score()),
            article.title,
            article.summary
        );
    }
    if let Some(article) = &result.top_negative {
        let _ = writeln!(
            out,
            "\nMost Negative Article [{}]\n  {}\n  {}",
            badge_text(article.score()),
            article.title,
            article.summary
        );
    }
    if let Some(audio_url) = &result.audio_url {
        let _ = writeln!(out, "\n🔊 Audio summary: {}", audio_url);
    }
    out
}

pub fn articles(result: &AnalysisResult) -> String {
    let mut out = String::new();
    for (i, article) in result.articles.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} [{}]\n    {} · {} · {}\n    {}",
            i + 1,
            article.title,
            badge_text(article.score()),
            article.source,
            article.date,
            article.url,
            article.summary
        );
    }
    out
}

fn bar(score: f64) -> String {
    let len = ((score.abs().min(1.0)) * HALF_WIDTH as f64).round() as usize;
    let (left, right) = if score < 0.0 {
        (format!("{}{}", " ".repeat(HALF_WIDTH - len), "█".repeat(len)), String::new())
    } else {
        (" ".repeat(HALF_WIDTH), "█".repeat(len))
    };
    format!("{}|{:<width$}", left, right, width = HALF_WIDTH)
}

pub fn chart(result: &AnalysisResult) -> String {
    let mut out = String::from("Comparative Sentiment Analysis\n");
    for point in chart_points(result) {
        let _ = writeln!(
            out,
            "{:>20} {} {:+.2} {}",
            point.source,
            bar(point.score),
            point.score,
            point.color
        );
    }
    out
}

pub fn query_hints() -> String {
    let mut out = String::from("Ask questions about the news (ni query <company> <question>). Examples:\n");
    for question in EXAMPLE_QUESTIONS {
        let _ = writeln!(out, "  - {}", question);
    }
    out
}

pub fn view(result: &AnalysisResult, view: View) -> String {
    match view {
        View::Articles => articles(result),
        View::Chart => chart(result),
        View::Query => query_hints(),
    }
}

pub fn notice(notice: &Notice) -> String {
    format!("[{:?}] {}", notice.level, notice.message)
}
