use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{Stats, Submission};
use crate::moderation::{self, review};
use crate::routes::error::AppResult;
use crate::routes::pages::SubmissionForm;
use crate::state::AppState;

const DEFAULT_RECENT_LIMIT: i64 = 5;
const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> AppResult<Json<Stats>> {
    let mut session = state.store.open_session().await?;
    Ok(Json(review::stats(&mut session).await?))
}

/// GET /api/submissions — newest first, any status.
pub async fn recent(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<Submission>>> {
    let limit = page
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);
    let offset = page.offset.unwrap_or(0).max(0);

    let mut session = state.store.open_session().await?;
    Ok(Json(review::list_recent(&mut session, limit, offset).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SubmissionForm>,
) -> AppResult<(StatusCode, Json<Submission>)> {
    let mut session = state.store.open_session().await?;
    let submission = moderation::submit(&mut session, form.into_input()).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}
