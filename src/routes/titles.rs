use axum::{extract::State, Json};
use serde::Serialize;

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub count: usize,
}

/// Handler listing every selectable title, in catalog order
pub async fn list(State(state): State<AppState>) -> Json<TitlesResponse> {
    let titles: Vec<String> = state
        .recommender
        .catalog()
        .titles()
        .map(str::to_string)
        .collect();

    Json(TitlesResponse {
        count: titles.len(),
        titles,
    })
}
