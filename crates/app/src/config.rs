use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub request_timeout: Duration,
    pub cors_allow_origins: Vec<String>,
    pub google_api_key: String,
    pub google_cx: String,
    pub reddit_client_id: String,
    pub reddit_secret: String,
    pub reddit_user_agent: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("missing required variable {0}")]
    Missing(&'static str),
    #[error("dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let http_addr_raw = env.read_string("THREADSCOUT_HTTP_ADDR", "127.0.0.1:8080");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let request_timeout_secs = env.read_u64("THREADSCOUT_REQUEST_TIMEOUT_SECS", 15)?;
        let cors_allow_origins = env
            .read_string("THREADSCOUT_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            http_addr,
            request_timeout: Duration::from_secs(request_timeout_secs),
            cors_allow_origins,
            google_api_key: env.required("GOOGLE_API_KEY")?,
            google_cx: env.required("GOOGLE_CX")?,
            reddit_client_id: env.required("REDDIT_CLIENT_ID")?,
            reddit_secret: env.required("REDDIT_SECRET")?,
            reddit_user_agent: env.read_string("REDDIT_USER_AGENT", "threadscout/0.1"),
        })
    }
}

/// Loads `.env` when present; variables already set win.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn read_string(&self, key: &'static str, default: &'static str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    fn read_u64(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        let raw = (self.0)(key).unwrap_or_else(|| default.to_string());
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(key, raw))
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        let value = (self.0)(key).unwrap_or_default();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Missing(key));
        }
        Ok(trimmed.to_string())
    }
}
