use std::sync::Arc;

use anyhow::anyhow;
use ni_core::state::{Applied, Event, SearchState, View};
use ni_core::{CompanyName, Error, Result};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::pipeline::AnalysisPipeline;

/// Owns the search state and the single in-flight search chain.
///
/// A new submission aborts the previous chain; events from a chain that
/// was already past the abort point are dropped by generation.
pub struct SearchSession {
    pipeline: Arc<AnalysisPipeline>,
    state: Arc<Mutex<SearchState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            state: Arc::new(Mutex::new(SearchState::new())),
            task: Mutex::new(None),
        }
    }

    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }

    /// Starts a search and returns its generation.
    pub async fn submit(&self, company: &str) -> Result<u64> {
        // Held across apply and spawn so concurrent submissions keep the
        // newest handle.
        let mut task = self.task.lock().await;

        let applied = self
            .state
            .lock()
            .await
            .apply(Event::Submit { company: company.to_string() })?;
        let (generation, company) = match applied {
            Applied::Started { generation, company } => (generation, company),
            other => return Err(Error::External(anyhow!("submission not started: {:?}", other))),
        };
        info!("🔍 Search #{} started for {}", generation, company);

        let handle = tokio::spawn(drive(self.pipeline.clone(), self.state.clone(), generation, company));
        if let Some(previous) = task.replace(handle) {
            if !previous.is_finished() {
                debug!("Aborting superseded search before #{}", generation);
            }
            previous.abort();
        }
        Ok(generation)
    }

    /// Waits for the in-flight chain, if any, to settle.
    pub async fn wait(&self) {
        let handle = self.task.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                debug!("Search task ended early: {}", e);
            }
        }
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.lock().await.clone()
    }

    pub async fn select_view(&self, view: View) -> Result<SearchState> {
        let mut state = self.state.lock().await;
        state.apply(Event::SelectView(view))?;
        Ok(state.clone())
    }
}

async fn drive(
    pipeline: Arc<AnalysisPipeline>,
    state: Arc<Mutex<SearchState>>,
    generation: u64,
    company: CompanyName,
) {
    let result = match pipeline.fetch(&company).await {
        Ok(result) => result,
        Err(e) => {
            info!("❌ Search #{} failed: {}", generation, e);
            let event = Event::FetchFailed { generation, message: e.to_string() };
            apply(&state, event).await;
            return;
        }
    };

    let applied = apply(&state, Event::FetchResolved { generation, result: result.clone() }).await;
    if applied == Some(Applied::Stale) {
        return;
    }

    let event = match pipeline.narrate(&company, &result).await {
        Ok(audio_url) => Event::SynthesisResolved { generation, audio_url },
        Err(e) => {
            info!("⚠️ Search #{} has no audio: {}", generation, e);
            Event::SynthesisFailed { generation, message: e.to_string() }
        }
    };
    if apply(&state, event).await == Some(Applied::Updated) {
        info!("✨ Search #{} complete for {}", generation, company);
    }
}

async fn apply(state: &Mutex<SearchState>, event: Event) -> Option<Applied> {
    match state.lock().await.apply(event) {
        Ok(applied) => Some(applied),
        Err(e) => {
            debug!("Event rejected: {}", e);
            None
        }
    }
}
