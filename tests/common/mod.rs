#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use tower::ServiceExt;

use modqueue::auth::StaticPassword;
use modqueue::config::Config;
use modqueue::db::Store;
use modqueue::routes;
use modqueue::state::AppState;

pub const ADMIN_PASSWORD: &str = "letmein";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        export_dir: PathBuf::from("exports"),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Router over a fresh in-memory store, wired the same way `serve` wires it.
pub async fn build_test_app() -> (Router, Store) {
    let config = test_config();
    let store = Store::connect(&config.database_url).await.unwrap();
    store.ensure_schema().await.unwrap();

    let state = Arc::new(AppState {
        store: store.clone(),
        config: Arc::new(config),
        admin: Arc::new(StaticPassword::new(ADMIN_PASSWORD)),
    });
    (routes::router(state), store)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn admin(app: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-admin-password", ADMIN_PASSWORD)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, form: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
