//! Search state machine.
//!
//! One submission drives a two-step chain: the analysis fetch, then the
//! narration request. Every step reports back with the generation it was
//! started for; anything that does not match the current generation is
//! stale and dropped, so the latest submission always wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AnalysisResult, CompanyName};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Articles,
    Chart,
    Query,
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "articles" => Ok(View::Articles),
            "chart" => Ok(View::Chart),
            "query" => Ok(View::Query),
            other => Err(Error::Input(format!("Unknown view: {}", other))),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Articles => "articles",
            View::Chart => "chart",
            View::Query => "query",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Submit { company: String },
    FetchResolved { generation: u64, result: AnalysisResult },
    FetchFailed { generation: u64, message: String },
    SynthesisResolved { generation: u64, audio_url: String },
    SynthesisFailed { generation: u64, message: String },
    SelectView(View),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A submission was accepted and starts a new chain.
    Started { generation: u64, company: CompanyName },
    Updated,
    /// The event belonged to a superseded submission.
    Stale,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub status: Status,
    pub company_name: Option<CompanyName>,
    pub result: Option<AnalysisResult>,
    pub active_view: View,
    pub generation: u64,
    pub notice: Option<Notice>,
    #[serde(skip)]
    pending: Option<AnalysisResult>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            status: Status::Idle,
            company_name: None,
            result: None,
            active_view: View::default(),
            generation: 0,
            notice: None,
            pending: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// Applies one event. Only a blank submission is an error, and it leaves
    /// the state untouched.
    pub fn apply(&mut self, event: Event) -> Result<Applied> {
        match event {
            Event::Submit { company } => {
                let company = CompanyName::parse(&company)?;
                self.generation += 1;
                self.status = Status::Loading;
                self.company_name = Some(company.clone());
                self.pending = None;
                self.notice = None;
                Ok(Applied::Started { generation: self.generation, company })
            }
            Event::SelectView(view) => {
                self.active_view = view;
                Ok(Applied::Updated)
            }
            Event::FetchResolved { generation, result } => {
                if !self.accepts(generation) {
                    return Ok(self.stale("fetch result", generation));
                }
                self.pending = Some(result);
                Ok(Applied::Updated)
            }
            Event::FetchFailed { generation, message } => {
                if !self.accepts(generation) {
                    return Ok(self.stale("fetch failure", generation));
                }
                self.status = Status::Error;
                self.result = None;
                self.pending = None;
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Failed to analyze news for {}: {}", self.company_label(), message),
                ));
                Ok(Applied::Updated)
            }
            Event::SynthesisResolved { generation, audio_url } => {
                if !self.accepts(generation) || self.pending.is_none() {
                    return Ok(self.stale("narration result", generation));
                }
                if let Some(result) = self.pending.take() {
                    self.result = Some(result.with_audio(audio_url));
                }
                self.status = Status::Ready;
                self.notice = Some(Notice::new(
                    NoticeLevel::Success,
                    format!("Analysis complete for {}", self.company_label()),
                ));
                Ok(Applied::Updated)
            }
            Event::SynthesisFailed { generation, message } => {
                if !self.accepts(generation) || self.pending.is_none() {
                    return Ok(self.stale("narration failure", generation));
                }
                if let Some(mut result) = self.pending.take() {
                    result.audio_url = None;
                    self.result = Some(result);
                }
                self.status = Status::Ready;
                self.notice = Some(Notice::new(
                    NoticeLevel::Warning,
                    format!("Audio summary unavailable: {}", message),
                ));
                Ok(Applied::Updated)
            }
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        self.status == Status::Loading && generation == self.generation
    }

    fn stale(&self, what: &str, generation: u64) -> Applied {
        debug!(
            "Dropping stale {} for generation {} (current {})",
            what, generation, self.generation
        );
        Applied::Stale
    }

    fn company_label(&self) -> &str {
        self.company_name.as_ref().map(CompanyName::as_str).unwrap_or_default()
    }
}
