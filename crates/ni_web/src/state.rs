use ni_inference::{AnalysisPipeline, SearchSession};

pub struct AppState {
    pub session: SearchSession,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        Self {
            session: SearchSession::new(pipeline),
        }
    }

    pub fn pipeline(&self) -> &AnalysisPipeline {
        self.session.pipeline()
    }
}
