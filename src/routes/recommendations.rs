use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Recommendations,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
}

/// Handler for `GET /recommendations?title=...`
pub async fn recommend_query(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationRequest>, QueryRejection>,
) -> AppResult<Json<Recommendations>> {
    let Query(request) = query?;
    recommend(&state, &request_id, request).await
}

/// Handler for `POST /recommendations` with a JSON body
pub async fn recommend_json(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Recommendations>> {
    let Json(request) = body?;
    recommend(&state, &request_id, request).await
}

async fn recommend(
    state: &AppState,
    request_id: &RequestId,
    request: RecommendationRequest,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        "Processing recommendation request"
    );

    let response = state.recommender.recommend(&request.title).await?;

    if !response.warnings.is_empty() {
        tracing::warn!(
            request_id = %request_id,
            warnings = response.warnings.len(),
            "Recommendations returned with poster warnings"
        );
    }

    Ok(Json(response))
}
