//! Password-gated review endpoints.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{header, request::Parts},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::Submission;
use crate::export;
use crate::moderation::review;
use crate::routes::error::{AppError, AppResult};
use crate::state::AppState;

pub const ADMIN_HEADER: &str = "x-admin-password";

const DEFAULT_PENDING_LIMIT: i64 = 50;
const MAX_PENDING_LIMIT: i64 = 500;

/// Present in a handler's arguments only if the request carried the admin password.
#[derive(Debug)]
pub struct Admin;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("Missing {} header", ADMIN_HEADER)))?;

        if !state.admin.verify(presented) {
            tracing::warn!("Rejected admin request with wrong password");
            return Err(AppError::Unauthorized("Invalid admin password".to_string()));
        }
        Ok(Admin)
    }
}

#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    pub limit: Option<i64>,
}

pub async fn pending(
    _admin: Admin,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PendingQuery>,
) -> AppResult<Json<Vec<Submission>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PENDING_LIMIT)
        .clamp(1, MAX_PENDING_LIMIT);
    let mut session = state.store.open_session().await?;
    Ok(Json(review::list_pending(&mut session, limit).await?))
}

pub async fn approve(
    _admin: Admin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Submission>> {
    let mut session = state.store.open_session().await?;
    Ok(Json(review::approve(&mut session, id).await?))
}

pub async fn reject(
    _admin: Admin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Submission>> {
    let mut session = state.store.open_session().await?;
    Ok(Json(review::reject(&mut session, id).await?))
}

/// CSV download of every approved submission.
pub async fn export_csv(
    _admin: Admin,
    State(state): State<Arc<AppState>>,
) -> AppResult<impl IntoResponse> {
    let mut session = state.store.open_session().await?;
    let bytes = export::export_approved(&mut session).await?;
    let filename = export::export_filename(Utc::now());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}
