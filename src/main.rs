// src/main.rs
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod accounts;
mod common;
mod logging_middleware;
mod persistence;
mod posts;
mod services;

#[cfg(test)]
mod test_support;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::{AppConfig, AppState};
use persistence::SqliteDatabase;
use services::{init_sentry, Argon2Hasher, SentryReporter};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer())
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env();
    let _sentry_guard = init_sentry(&config.monitoring);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    common::migrations::run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let hasher = Argon2Hasher::new(
        config.password_hash.memory_kib,
        config.password_hash.iterations,
    )?;

    let state = AppState {
        db: Arc::new(SqliteDatabase::new(pool)),
        limits: Arc::new(config.limits.clone()),
        hasher: Arc::new(hasher),
        reporter: Arc::new(SentryReporter),
    };

    let app = build_router(Arc::new(state), &config.cors_origins);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    Router::new()
        .merge(accounts::accounts_routes())
        .merge(posts::posts_routes())
        // Request/response bodies, secrets redacted, at debug level
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        let (state, _) = test_state().await;
        build_router(Arc::new(state), &[])
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_signup_login_and_post_over_http() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/account/signup",
            Some(json!({
                "loginId": "member001",
                "password": "correct-horse1",
                "name": "Kim",
                "phoneNumber": "01012345678",
                "email": "kim@example.com"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isSuccess"], true);

        let (_, body) = send(
            &app,
            "POST",
            "/api/account/login",
            Some(json!({ "loginId": "member001", "password": "correct-horse1" })),
        )
        .await;
        let user_id = body["data"].as_i64().unwrap();

        // The client sends the id back as a string
        let (status, body) = send(
            &app,
            "POST",
            "/api/post",
            Some(json!({ "userId": user_id.to_string(), "title": "hi", "content": "first" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isSuccess"], true);

        let (_, body) = send(&app, "GET", "/api/post/all", None).await;
        assert_eq!(body["data"][0]["title"], "hi");
        assert_eq!(body["data"][0]["author_name"], "Kim");

        let (_, body) = send(&app, "GET", &format!("/api/account/{}", user_id), None).await;
        assert_eq!(body["data"]["login_id"], "member001");
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_missing_body_is_400_envelope() {
        let app = app().await;
        let (status, body) = send(&app, "POST", "/api/account/login", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "isSuccess": false, "data": null, "message": "loginId is required" })
        );
    }

    #[tokio::test]
    async fn test_not_found_is_200_with_unsuccessful_envelope() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/api/post/77", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isSuccess"], false);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_static_routes_win_over_path_params() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/api/post/all", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "no posts yet");

        let (status, body) = send(&app, "GET", "/api/account/loginId", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name is required");
    }

    #[tokio::test]
    async fn test_post_for_unknown_user_is_400() {
        let app = app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/post",
            Some(json!({ "userId": 31337, "title": "hi", "content": "orphan" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "user does not exist");
    }
}
