//! HTTP surface: a single matching endpoint plus a liveness probe

pub mod handlers;

use crate::config::Config;
use crate::embedding::Model2VecProvider;
use crate::error::Result;
use crate::input::{PdfExtractor, TextCache};
use crate::matching::PairScorer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Batches of PDF uploads can be large; the axum default of 2 MB is too tight.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<PairScorer>,
    pub min_upload_bytes: usize,
}

/// Request-level error rendered as `{"detail": ...}`, mirroring the error
/// shape clients of the original service already parse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<crate::error::ResumeMatcherError> for ApiError {
    fn from(err: crate::error::ResumeMatcherError) -> Self {
        use crate::error::ResumeMatcherError;
        match err {
            ResumeMatcherError::InvalidDocument(msg) | ResumeMatcherError::InvalidInput(msg) => {
                ApiError::BadRequest(msg)
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/match/", post(handlers::match_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the full application state and serve until shutdown.
///
/// The embedding model is loaded once here and injected into the scorer; its
/// lifetime is the lifetime of the process.
pub async fn serve(config: Config) -> Result<()> {
    let provider = Model2VecProvider::from_config(&config)?;
    let text_cache = TextCache::new(config.text_cache_dir(), Box::new(PdfExtractor))?;
    let scorer = PairScorer::new(text_cache, Arc::new(provider), &config);

    let state = AppState {
        scorer: Arc::new(scorer),
        min_upload_bytes: config.server.min_upload_bytes,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
