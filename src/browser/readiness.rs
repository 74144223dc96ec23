use chromiumoxide::Page;
use std::time::Duration;

/// Poll for the template's readiness flag.
///
/// The report template sets `window.__reportReady = true` once its charts
/// are drawn. Returns `true` if the flag was observed within `timeout_ms`;
/// a timeout is not an error, the caller decides how to settle.
pub async fn wait_for_report_ready(page: &Page, timeout_ms: u64) -> bool {
    let attempts = (timeout_ms / 250).max(1);

    for i in 0..attempts {
        tokio::time::sleep(Duration::from_millis(250)).await;

        let js = "({ ready: window.__reportReady === true, state: document.readyState })";

        if let Ok(result) = page.evaluate(js).await {
            if let Ok(value) = result.into_value::<serde_json::Value>() {
                let ready = value
                    .get("ready")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                let state = value.get("state").and_then(|v| v.as_str()).unwrap_or("");

                if ready && state == "complete" {
                    tracing::debug!("✅ Report ready after {} ms", (i + 1) * 250);
                    return true;
                }
            }
        }
    }

    tracing::warn!("⚠️ Readiness flag not raised within {} ms", timeout_ms);
    false
}
