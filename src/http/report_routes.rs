use crate::config::DeployMode;
use crate::http::{ApiError, AppState, PdfListResponse};
use crate::services::artifacts::pdf_filename;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

pub async fn generate_pdf_handler(
    State(state): State<AppState>,
    Json(report): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    // The only structural contract on the payload: a `rooms` field.
    // Rejected before any browser is launched.
    if report.get("rooms").is_none() {
        tracing::warn!("⚠️ Report payload rejected: missing 'rooms' field");
        return Err(ApiError::InvalidReport(
            "Report payload must contain a 'rooms' field".to_string(),
        ));
    }

    let client_name = report
        .get("clientName")
        .and_then(|v| v.as_str())
        .unwrap_or("client");

    tracing::info!("📥 PDF generation requested: client={}", client_name);

    let bytes = state.renderer.render(&report).await?;
    let filename = pdf_filename(client_name, Utc::now());

    if state.config.deploy_mode == DeployMode::Local {
        let path = state.artifacts.save(&filename, &bytes).await?;
        tracing::info!("💾 PDF saved: {} ({} bytes)", path.display(), bytes.len());
    }

    tracing::info!("✅ PDF generated: {} ({} bytes)", filename, bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (header::CONTENT_LENGTH, bytes.len().to_string()),
        ],
        bytes,
    ))
}

pub async fn list_pdfs_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let pdfs = state.artifacts.list().await?;

    tracing::debug!("📋 Listed {} generated PDFs", pdfs.len());

    Ok((StatusCode::OK, Json(PdfListResponse { pdfs })))
}
