use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use moxie_frame::FrameHandler;
use moxie_frame_common::Config;
use moxie_frame_server::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("moxie_frame=info,moxie_frame_server=info,tower_http=info")
    });
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    let handler = FrameHandler::from_config(&config)?;

    let state = Arc::new(AppState {
        handler,
        public_url: config.app_url.clone(),
    });
    let app = router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(
        farscore = %config.farscore_url,
        moxie = %config.moxie_earnings_url,
        "Moxie frame server starting on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
