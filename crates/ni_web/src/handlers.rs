use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use ni_core::chart::{chart_points, ChartPoint};
use ni_core::query::{answer, QueryAnswer};
use ni_core::state::{SearchState, View};
use ni_core::{AnalysisResult, CompanyName, Error, Language};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct NarrationRequest {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationResponse {
    pub audio_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub company: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchAccepted {
    pub generation: u64,
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(company): Path<String>,
) -> ApiResult<AnalysisResult> {
    let company = CompanyName::parse(&company)?;
    let result = state.pipeline().fetch(&company).await?;
    Ok(Json(result))
}

pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(company): Path<String>,
) -> ApiResult<Vec<ChartPoint>> {
    let company = CompanyName::parse(&company)?;
    let result = state.pipeline().fetch(&company).await?;
    Ok(Json(chart_points(&result)))
}

pub async fn create_narration(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NarrationRequest>,
) -> ApiResult<NarrationResponse> {
    if request.text.trim().is_empty() {
        return Err(Error::Input("narration text must not be empty".to_string()).into());
    }
    let language = match request.language {
        Some(code) => code.parse::<Language>()?,
        None => state.pipeline().language(),
    };
    let audio_url = state
        .pipeline()
        .providers()
        .narration
        .narrate(&request.text, language)
        .await?;
    Ok(Json(NarrationResponse { audio_url }))
}

pub async fn start_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<SearchAccepted> {
    let generation = state.session.submit(&request.company).await?;
    Ok(Json(SearchAccepted { generation }))
}

pub async fn get_search(State(state): State<Arc<AppState>>) -> Json<SearchState> {
    Json(state.session.snapshot().await)
}

pub async fn select_view(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ViewRequest>,
) -> ApiResult<SearchState> {
    Ok(Json(state.session.select_view(request.view).await?))
}

pub async fn query_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<QueryAnswer> {
    let snapshot = state.session.snapshot().await;
    let result = snapshot
        .result
        .ok_or_else(|| Error::NotFound("no analysis result to query".to_string()))?;
    Ok(Json(answer(&result, &request.question)))
}
