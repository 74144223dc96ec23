use inspection_server::config::{Config, DeployMode};
use inspection_server::http::{create_router, AppState};
use inspection_server::services::{ArtifactStore, PdfRenderer};
use std::sync::Arc;
use std::time::SystemTime;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    match dotenvy::dotenv() {
        Ok(path) => eprintln!("✅ .env loaded from: {:?}", path),
        Err(e) => eprintln!("⚠️  .env not found: {}", e),
    }

    // Logging setup
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inspection_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Inspection PDF server starting...");

    let config = Arc::new(Config::from_env()?);
    tracing::info!("✅ Config loaded");
    tracing::info!("   HTTP Addr: {}", config.http_addr());
    tracing::info!("   Deploy Mode: {:?}", config.deploy_mode);
    tracing::info!("   Headless: {}", config.headless);
    tracing::info!("   Template: {}", config.template_path.display());
    tracing::info!("   PDF Dir: {}", config.pdf_dir.display());

    if config.deploy_mode == DeployMode::Local {
        tokio::fs::create_dir_all(&config.pdf_dir).await?;
    }

    let renderer = Arc::new(PdfRenderer::new(config.clone()));
    let artifacts = Arc::new(ArtifactStore::new(config.pdf_dir.clone()));

    let state = AppState {
        config: config.clone(),
        renderer,
        artifacts,
        start_time: SystemTime::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.http_addr()).await?;
    tracing::info!("🌐 Server listening: http://{}", config.http_addr());
    tracing::info!("📋 Endpoints:");
    tracing::info!("   GET  /");
    tracing::info!("   GET  /api/health");
    tracing::info!("   POST /api/generate-pdf");
    tracing::info!("   GET  /api/pdfs");

    axum::serve(listener, app).await?;

    Ok(())
}
