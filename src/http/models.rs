use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// One generated PDF on disk. The directory is the index; entries are
/// derived from filesystem metadata at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfListResponse {
    pub pdfs: Vec<PdfEntry>,
}
