use serde::Deserialize;
use serde_json::from_str;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const SEARCH_PATH: &str = "/customsearch/v1";
const SITE_CLAUSE: &str = " site:reddit.com";
pub const MAX_RESULTS: u8 = 10;

#[derive(Debug, Error)]
pub enum GoogleSearchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search request failed: status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Google Programmable Search client restricted to reddit.com.
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    pub fn new(http: reqwest::Client, base_url: String, api_key: String, engine_id: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            engine_id,
        }
    }

    /// Returns result links in the order Google ranked them.
    pub async fn find_posts(&self, query: &str) -> Result<Vec<String>, GoogleSearchError> {
        let scoped = scoped_query(query);
        let num = MAX_RESULTS.to_string();
        let response = self
            .http
            .get(format!("{}{SEARCH_PATH}", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", scoped.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GoogleSearchError::Status {
                status,
                message: error_message(&body),
            });
        }
        parse_links(&body)
    }
}

fn scoped_query(query: &str) -> String {
    format!("{query}{SITE_CLAUSE}")
}

fn parse_links(body: &str) -> Result<Vec<String>, GoogleSearchError> {
    let payload: SearchResponse = from_str(body)
        .map_err(|err| GoogleSearchError::InvalidResponse(err.to_string()))?;
    Ok(payload
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.link)
        .collect())
}

fn error_message(body: &str) -> String {
    match from_str::<ErrorResponse>(body) {
        Ok(payload) => payload.error.message,
        Err(_) => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
