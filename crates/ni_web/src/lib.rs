use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/analysis/:company", get(handlers::get_analysis))
        .route("/api/analysis/:company/chart", get(handlers::get_chart))
        .route("/api/narration", post(handlers::create_narration))
        .route("/api/search", post(handlers::start_search).get(handlers::get_search))
        .route("/api/search/view", put(handlers::select_view))
        .route("/api/search/query", post(handlers::query_search))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ni_core::{AnalysisResult, Error, Result};
}
