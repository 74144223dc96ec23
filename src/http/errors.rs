use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidReport(String),

    #[error("{message}")]
    Render {
        message: String,
        /// Underlying error detail, only populated in dev mode.
        detail: Option<String>,
    },

    #[error("{0}")]
    Delivery(String),

    #[error("{0}")]
    NotFound(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ApiError {
    fn error_label(&self) -> &'static str {
        match self {
            ApiError::InvalidReport(_) => "Invalid report data",
            ApiError::Render { .. } => "PDF generation failed",
            ApiError::Delivery(_) => "Internal Server Error",
            ApiError::NotFound(_) => "Not Found",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidReport(_) => StatusCode::BAD_REQUEST,
            ApiError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let stack = match &self {
            ApiError::Render { detail, .. } => detail.clone(),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.error_label().to_string(),
            message: self.to_string(),
            stack,
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Delivery(err.to_string())
    }
}
