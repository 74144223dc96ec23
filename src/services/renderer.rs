use crate::browser::{launch_browser, wait_for_report_ready};
use crate::config::Config;
use crate::http::ApiError;
use chromiumoxide::cdp::browser_protocol::page::{
    AddScriptToEvaluateOnNewDocumentParams, PrintToPdfParams,
};
use chromiumoxide::{Browser, Page};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

// A4 in inches, 10mm margins
const PAPER_WIDTH_IN: f64 = 8.27;
const PAPER_HEIGHT_IN: f64 = 11.69;
const MARGIN_IN: f64 = 0.39;

/// Renders a report payload to PDF through a headless browser.
///
/// Every render launches its own browser instance; a semaphore bounds how
/// many run at once.
pub struct PdfRenderer {
    config: Arc<Config>,
    render_slots: Semaphore,
}

impl PdfRenderer {
    pub fn new(config: Arc<Config>) -> Self {
        let permits = config.max_concurrent_renders.max(1);
        Self {
            config,
            render_slots: Semaphore::new(permits),
        }
    }

    pub async fn render(&self, report: &Value) -> Result<Vec<u8>, ApiError> {
        let _permit = self
            .render_slots
            .acquire()
            .await
            .map_err(|e| self.render_error("render queue closed", e))?;

        self.write_scratch(report).await;

        let mut browser = launch_browser(&self.config)
            .await
            .map_err(|e| self.render_error("browser launch failed", e))?;

        // Capture the result first so the browser is closed on every path
        let result = self.render_on(&browser, report).await;

        if let Err(e) = browser.close().await {
            tracing::warn!("⚠️ Browser close failed: {}", e);
        }

        self.remove_scratch().await;

        result
    }

    async fn render_on(&self, browser: &Browser, report: &Value) -> Result<Vec<u8>, ApiError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| self.render_error("page creation failed", e))?;

        self.inject_report_data(&page, report).await?;

        let template_url = self.template_url().await?;
        tracing::debug!("🌐 Navigating to template: {}", template_url);

        // The template may still finish loading through the readiness poll
        // below, so a navigation error is not fatal.
        if let Err(e) = page.goto(template_url.as_str()).await {
            tracing::warn!("⚠️ Template navigation error (continuing): {}", e);
        }
        let _ = page.wait_for_navigation().await;

        if !wait_for_report_ready(&page, self.config.ready_timeout_ms).await {
            tracing::warn!("⏳ Falling back to {} ms settle delay", self.config.settle_ms);
            tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;
        }

        let params = PrintToPdfParams {
            landscape: Some(false),
            print_background: Some(true),
            prefer_css_page_size: Some(true),
            paper_width: Some(PAPER_WIDTH_IN),
            paper_height: Some(PAPER_HEIGHT_IN),
            margin_top: Some(MARGIN_IN),
            margin_bottom: Some(MARGIN_IN),
            margin_left: Some(MARGIN_IN),
            margin_right: Some(MARGIN_IN),
            ..Default::default()
        };

        let bytes = page
            .pdf(params)
            .await
            .map_err(|e| self.render_error("PDF export failed", e))?;

        tracing::debug!("📄 PDF exported: {} bytes", bytes.len());

        Ok(bytes)
    }

    /// Make the payload visible as `window.__REPORT_DATA__` before any of the
    /// template's own scripts run.
    async fn inject_report_data(&self, page: &Page, report: &Value) -> Result<(), ApiError> {
        let payload = serde_json::to_string(report)
            .map_err(|e| self.render_error("report serialization failed", e))?;
        let script = format!("window.__REPORT_DATA__ = {};", payload);

        page.execute(AddScriptToEvaluateOnNewDocumentParams::from(script))
            .await
            .map_err(|e| self.render_error("report data injection failed", e))?;

        Ok(())
    }

    async fn template_url(&self) -> Result<String, ApiError> {
        let absolute = tokio::fs::canonicalize(&self.config.template_path)
            .await
            .map_err(|e| {
                self.render_error(
                    &format!(
                        "report template not found at {}",
                        self.config.template_path.display()
                    ),
                    e,
                )
            })?;

        Ok(format!("file://{}", absolute.display()))
    }

    async fn write_scratch(&self, report: &Value) {
        let path = self.config.scratch_path();
        match serde_json::to_vec_pretty(report) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&path, bytes).await {
                    tracing::warn!("⚠️ Scratch write failed ({}): {}", path.display(), e);
                }
            }
            Err(e) => tracing::warn!("⚠️ Scratch serialize failed: {}", e),
        }
    }

    async fn remove_scratch(&self) {
        let path = self.config.scratch_path();
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("⚠️ Scratch cleanup failed ({}): {}", path.display(), e);
            }
        }
    }

    fn render_error(
        &self,
        context: &str,
        err: impl std::fmt::Display + std::fmt::Debug,
    ) -> ApiError {
        ApiError::Render {
            message: format!("{}: {}", context, err),
            detail: self.config.dev_mode.then(|| format!("{:?}", err)),
        }
    }
}
