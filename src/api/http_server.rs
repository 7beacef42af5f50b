// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::errors::ApiError;
use super::pages::{render_index, UPLOADS_URL_PREFIX};
use super::predict::{predict_json_handler, predict_page_handler};
use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::upload::UploadStore;

/// Shared, read-only server state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub upload_store: UploadStore,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        upload_store: UploadStore,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            classifier,
            upload_store,
            max_upload_bytes,
        }
    }
}

/// Build the router with all routes and layers
pub fn create_app(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(state.upload_store.dir());

    Router::new()
        // Upload form
        .route("/", get(index_handler))
        // Form flow: GET redirects home, POST classifies
        .route("/predict", get(predict_get_handler).post(predict_page_handler))
        // JSON flow
        .route("/v1/predict", post(predict_json_handler))
        .route("/health", get(health_handler))
        .nest_service(UPLOADS_URL_PREFIX, uploads)
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `config.listen_addr` and serve until ctrl-c
pub async fn start_server(
    config: AppConfig,
    classifier: Arc<dyn Classifier>,
) -> anyhow::Result<()> {
    let upload_store = UploadStore::new(&config.upload_dir);
    upload_store.ensure_dir().await?;

    let state = Arc::new(AppState::new(
        classifier,
        upload_store,
        config.max_upload_bytes,
    ));
    let app = create_app(state);

    let addr = config.listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("✅ HTTP server listening on http://{}", addr);
    tracing::info!("   Uploads stored in {}", config.upload_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn index_handler() -> Html<String> {
    Html(render_index())
}

async fn predict_get_handler() -> axum::response::Redirect {
    axum::response::Redirect::to("/")
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "model": state.classifier.name(),
        "version": crate::version::VERSION_NUMBER,
        "build": crate::version::get_version_info(),
    }))
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
