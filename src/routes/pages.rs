use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

use crate::db::{Category, Platform, Session, SubmissionInput};
use crate::error::Error;
use crate::moderation::{self, review};
use crate::routes::error::AppResult;
use crate::state::AppState;

const LATEST_ON_PAGE: i64 = 5;

/// Fields a visitor can fill in. Status is never taken from the public form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub anonymized_text: String,
}

impl SubmissionForm {
    pub fn into_input(self) -> SubmissionInput {
        SubmissionInput {
            text: self.text,
            category: self.category,
            platform: self.platform,
            context: Some(self.context),
            anonymized_text: Some(self.anonymized_text),
            status: None,
        }
    }
}

#[derive(Deserialize)]
pub struct IndexQuery {
    submitted: Option<String>,
}

#[derive(Serialize)]
struct LatestEntry {
    category: String,
    platform: String,
    timestamp: String,
    text: String,
    status: String,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> AppResult<Html<String>> {
    let mut session = state.store.open_session().await?;
    let form = SubmissionForm {
        category: Category::ALL[0].to_string(),
        platform: Platform::ALL[0].to_string(),
        ..Default::default()
    };
    render_index(&mut session, &form, None, query.submitted.is_some()).await
}

pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SubmissionForm>,
) -> AppResult<Response> {
    let mut session = state.store.open_session().await?;

    match moderation::submit(&mut session, form.clone().into_input()).await {
        Ok(_) => Ok(Redirect::to("/?submitted=1").into_response()),
        Err(Error::Validation(msg)) => {
            let page = render_index(&mut session, &form, Some(&msg), false).await?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn render_index(
    session: &mut Session,
    form: &SubmissionForm,
    error: Option<&str>,
    submitted: bool,
) -> AppResult<Html<String>> {
    let stats = review::stats(session).await?;
    let latest: Vec<LatestEntry> = review::list_recent(session, LATEST_ON_PAGE, 0)
        .await?
        .into_iter()
        .map(|s| LatestEntry {
            category: s.category.to_string(),
            platform: s.platform.to_string(),
            timestamp: s.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            text: s.display_text().to_string(),
            status: s.status.to_string(),
        })
        .collect();

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let platforms: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();

    let mut ctx = Context::new();
    ctx.insert("categories", &categories);
    ctx.insert("platforms", &platforms);
    ctx.insert("form", form);
    ctx.insert("stats", &stats);
    ctx.insert("latest", &latest);
    ctx.insert("error", &error);
    ctx.insert("submitted", &submitted);

    let rendered = crate::templates::get_tera().render("index.html", &ctx)?;
    Ok(Html(rendered))
}
