use std::env;
use std::path::PathBuf;

/// Where the service is deployed. Serverless gets temp-dir scratch space and
/// streams PDFs straight back; local mode keeps a persistent `pdfs` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    Local,
    Serverless,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub deploy_mode: DeployMode,
    pub dev_mode: bool,

    // Paths
    pub pdf_dir: PathBuf,
    pub public_dir: PathBuf,
    pub template_path: PathBuf,

    // Browser
    pub chrome_path: Option<String>,
    pub headless: bool,

    // Render timing
    pub ready_timeout_ms: u64,
    pub settle_ms: u64,

    // Admission control
    pub max_concurrent_renders: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let serverless: bool = env::var("SERVERLESS")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            deploy_mode: if serverless {
                DeployMode::Serverless
            } else {
                DeployMode::Local
            },
            dev_mode: env::var("DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),

            pdf_dir: env::var("PDF_DIR")
                .unwrap_or_else(|_| "pdfs".to_string())
                .into(),
            public_dir: env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            template_path: env::var("TEMPLATE_PATH")
                .unwrap_or_else(|_| "public/report-template.html".to_string())
                .into(),

            chrome_path: env::var("CHROME_PATH").ok().filter(|s| !s.is_empty()),
            headless: env::var("HEADLESS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            ready_timeout_ms: env::var("READY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
            settle_ms: env::var("SETTLE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2000),

            max_concurrent_renders: env::var("MAX_CONCURRENT_RENDERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Scratch file for the raw report payload. Written for external
    /// inspection only; the render path injects the data in-process.
    pub fn scratch_path(&self) -> PathBuf {
        match self.deploy_mode {
            DeployMode::Serverless => env::temp_dir().join("inspection-report-data.json"),
            DeployMode::Local => PathBuf::from("temp-report-data.json"),
        }
    }
}
