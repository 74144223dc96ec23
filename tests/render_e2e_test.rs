use inspection_server::config::{Config, DeployMode};
use inspection_server::http::{create_router, AppState};
use inspection_server::services::{ArtifactStore, PdfRenderer};
use std::sync::Arc;
use std::time::SystemTime;

/// Full JSON → template → PDF round trip through a real Chrome.
///
/// Needs a local Chrome binary (CHROME_PATH or `google-chrome` on PATH).
/// Run manually: cargo test --test render_e2e_test -- --ignored
#[tokio::test]
#[ignore]
async fn generate_pdf_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();

    let config = Arc::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        deploy_mode: DeployMode::Local,
        dev_mode: true,
        pdf_dir: tmp.path().to_path_buf(),
        public_dir: "public".into(),
        template_path: "public/report-template.html".into(),
        chrome_path: std::env::var("CHROME_PATH").ok(),
        headless: true,
        ready_timeout_ms: 10000,
        settle_ms: 2000,
        max_concurrent_renders: 1,
    });

    let state = AppState {
        config: config.clone(),
        renderer: Arc::new(PdfRenderer::new(config.clone())),
        artifacts: Arc::new(ArtifactStore::new(config.pdf_dir.clone())),
        start_time: SystemTime::now(),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/generate-pdf", addr))
        .json(&serde_json::json!({
            "clientName": "Acme Corp!",
            "inspectionDate": "2024-03-07",
            "rooms": [
                { "name": "Kitchen", "condition": "good",
                  "readings": { "humidity": 42, "temperature": 21 } }
            ]
        }))
        .send()
        .await
        .expect("Failed to call generate endpoint");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/pdf"
    );

    let disposition = response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment; filename=\"inspection-acme-corp-"));

    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // Local mode persists the artifact, so the listing sees it
    let listing: serde_json::Value = reqwest::get(format!("http://{}/api/pdfs", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let pdfs = listing["pdfs"].as_array().unwrap();
    assert_eq!(pdfs.len(), 1);
    assert!(pdfs[0]["name"]
        .as_str()
        .unwrap()
        .starts_with("inspection-acme-corp-"));
}
