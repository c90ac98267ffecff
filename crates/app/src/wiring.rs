use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use threadscout_infra::google::{DEFAULT_BASE_URL, GoogleSearchClient};
use threadscout_infra::reddit::{RedditClient, RedditEndpoints};

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let search = GoogleSearchClient::new(
        client.clone(),
        DEFAULT_BASE_URL.to_string(),
        config.google_api_key.clone(),
        config.google_cx.clone(),
    );
    let reddit = RedditClient::new(
        client,
        RedditEndpoints::default(),
        config.reddit_client_id.clone(),
        config.reddit_secret.clone(),
        config.reddit_user_agent.clone(),
    );
    Ok(AppState {
        config: Arc::new(config),
        search: Arc::new(search),
        reddit: Arc::new(reddit),
    })
}
