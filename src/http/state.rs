use crate::config::Config;
use crate::services::{ArtifactStore, PdfRenderer};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub renderer: Arc<PdfRenderer>,
    pub artifacts: Arc<ArtifactStore>,
    pub start_time: SystemTime,
}
