use crate::config::DeployMode;
use crate::http::report_routes::{generate_pdf_handler, list_pdfs_handler};
use crate::http::{ApiError, AppState, HealthResponse};
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::time::SystemTime;
use tower_http::services::ServeDir;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/generate-pdf", post(generate_pdf_handler))
        .route("/api/pdfs", get(list_pdfs_handler));

    let mut router = Router::new()
        .route("/", get(index_handler))
        .merge(api_routes);

    // Generated PDFs are only persisted (and therefore servable) locally
    if state.config.deploy_mode == DeployMode::Local {
        router = router.nest_service("/pdfs", ServeDir::new(&state.config.pdf_dir));
    }

    router.fallback(not_found_handler).with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let index_path = state.config.public_dir.join("index.html");
    let html = tokio::fs::read_to_string(&index_path)
        .await
        .map_err(|_| ApiError::NotFound(format!("Entry page not found: {}", index_path.display())))?;

    Ok(Html(html))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SystemTime::now()
        .duration_since(state.start_time)
        .unwrap_or_default()
        .as_secs();

    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        service: "inspection-pdf-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
    };

    (StatusCode::OK, Json(response))
}

async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route not found: {}", uri.path()))
}
