use crate::config::Config;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;

/// Launch a headless Chrome instance over CDP for a single render.
pub async fn launch_browser(config: &Config) -> Result<Browser, CdpError> {
    let chrome_path = config.chrome_path.clone().unwrap_or_else(|| {
        // Default paths
        if cfg!(target_os = "windows") {
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe".to_string()
        } else if cfg!(target_os = "macos") {
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome".to_string()
        } else {
            "google-chrome".to_string()
        }
    });

    tracing::debug!("🔍 Chrome path: {}", chrome_path);

    let mut args = vec![
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--window-size=1920,1080",
        "--hide-scrollbars",
        "--font-render-hinting=none",
    ];

    if config.headless {
        args.push("--headless=new");
    }

    let mut builder = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .window_size(1920, 1080)
        .args(args);

    if !config.headless {
        builder = builder.with_head();
    }

    let browser_config = builder.build().map_err(|e| {
        CdpError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("BrowserConfig build error: {}", e),
        ))
    })?;

    let (browser, mut handler) = Browser::launch(browser_config).await?;

    // The CDP event stream must be drained for the connection to make progress
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::debug!("CDP event error: {:?}", e);
            }
        }
        tracing::debug!("CDP handler finished");
    });

    tracing::info!("🚀 Browser launched");

    Ok(browser)
}
