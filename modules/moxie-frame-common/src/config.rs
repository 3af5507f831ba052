use std::env;
use std::time::Duration;

use crate::error::FrameError;

pub const DEFAULT_COMPOSER_URL: &str = "https://warpcast.com/~/compose";
pub const DEFAULT_SHARE_TEXT: &str = "Check your Moxie rewards, frame made by @tieubochet.eth";
pub const DEFAULT_SPLASH_IMAGE_URL: &str = "https://i.imgur.com/XqD31MV.png";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Public URLs
    pub app_url: String,
    pub frames_url: String,

    // Data sources
    pub farscore_url: String,
    pub moxie_earnings_url: String,
    pub http_timeout: Duration,

    // Share action
    pub composer_url: String,
    pub share_text: String,

    // Rendering
    pub splash_image_url: String,
    pub score_image_url: String,
}

impl Config {
    /// Load configuration from environment variables. Every variable is optional.
    pub fn from_env() -> Result<Self, FrameError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FrameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_url = lookup("APP_URL").unwrap_or_else(|| "http://localhost:3000".to_string());
        url::Url::parse(&app_url)
            .map_err(|e| FrameError::Config(format!("APP_URL {app_url:?} is not a URL: {e}")))?;

        let mut config = Self::for_app_url(&app_url);

        if let Some(host) = lookup("WEB_HOST") {
            config.web_host = host;
        }
        if let Some(port) = lookup("WEB_PORT") {
            config.web_port = port
                .parse()
                .map_err(|_| FrameError::Config(format!("WEB_PORT must be a number, got {port:?}")))?;
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                FrameError::Config(format!("HTTP_TIMEOUT_SECS must be a number, got {secs:?}"))
            })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        let overrides: [(&str, &mut String); 7] = [
            ("FRAMES_URL", &mut config.frames_url),
            ("FARSCORE_URL", &mut config.farscore_url),
            ("MOXIE_EARNINGS_URL", &mut config.moxie_earnings_url),
            ("COMPOSER_URL", &mut config.composer_url),
            ("SHARE_TEXT", &mut config.share_text),
            ("SPLASH_IMAGE_URL", &mut config.splash_image_url),
            ("SCORE_IMAGE_URL", &mut config.score_image_url),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key) {
                *slot = value;
            }
        }

        Ok(config)
    }

    /// Defaults with every service URL derived from one public base.
    pub fn for_app_url(app_url: &str) -> Self {
        let base = app_url.trim_end_matches('/');
        Self {
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
            app_url: base.to_string(),
            frames_url: format!("{base}/frames"),
            farscore_url: format!("{base}/api/farscore"),
            moxie_earnings_url: format!("{base}/api/moxie-earnings"),
            http_timeout: Duration::from_secs(10),
            composer_url: DEFAULT_COMPOSER_URL.to_string(),
            share_text: DEFAULT_SHARE_TEXT.to_string(),
            splash_image_url: DEFAULT_SPLASH_IMAGE_URL.to_string(),
            score_image_url: format!("{base}/api/score-image"),
        }
    }
}
