use anyhow::{Context, Result};

/// Default DeepSeek-compatible endpoint. Override with DEEPSEEK_BASE_URL
/// (useful for proxies and for pointing tests at a stub server).
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Application configuration loaded from environment variables.
///
/// The upstream credential is intentionally NOT required at startup: a
/// missing or placeholder key is reported per-request with remediation
/// guidance instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub deepseek_api_key: String,
    pub deepseek_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            deepseek_api_key: std::env::var("DEEPSEEK_API_KEY").unwrap_or_default(),
            deepseek_base_url: std::env::var("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
