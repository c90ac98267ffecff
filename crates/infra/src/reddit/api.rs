use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{from_str, from_value, Value};
use thiserror::Error;

use threadscout_core::domain::thread::{Thread, ThreadComment, ThreadReply};
use threadscout_core::types::post_id::PostId;

const TOKEN_PATH: &str = "/api/v1/access_token";

#[derive(Debug, Error)]
pub enum RedditError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reddit request failed: status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("missing data: {0}")]
    MissingData(&'static str),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(f64),
}

/// Hosts for the token exchange and the authenticated read API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditEndpoints {
    pub auth_base: String,
    pub api_base: String,
}

impl Default for RedditEndpoints {
    fn default() -> Self {
        Self {
            auth_base: "https://www.reddit.com".to_string(),
            api_base: "https://oauth.reddit.com".to_string(),
        }
    }
}

/// Application-only OAuth client for Reddit's read API.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: reqwest::Client,
    token_url: String,
    api_base: String,
    client_id: String,
    client_secret: String,
    user_agent: String,
}

impl RedditClient {
    pub fn new(
        http: reqwest::Client,
        endpoints: RedditEndpoints,
        client_id: String,
        client_secret: String,
        user_agent: String,
    ) -> Self {
        let auth_base = endpoints.auth_base.trim_end_matches('/');
        Self {
            http,
            token_url: format!("{auth_base}{TOKEN_PATH}"),
            api_base: endpoints.api_base.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            user_agent,
        }
    }

    /// Fetches the title, top-level comments and their direct replies.
    pub async fn fetch_thread(&self, post_id: &PostId) -> Result<Thread, RedditError> {
        let token = self.access_token().await?;
        let url = format!("{}/comments/{post_id}", self.api_base);
        let response = self
            .http
            .get(url)
            .query(&[("raw_json", "1"), ("depth", "2")])
            .header("Authorization", format!("Bearer {token}"))
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RedditError::Status {
                status,
                message: format!("comments for {post_id}: {body}"),
            });
        }
        parse_thread(&body)
    }

    async fn access_token(&self) -> Result<String, RedditError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header("User-Agent", &self.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RedditError::Status {
                status,
                message: format!("access token: {body}"),
            });
        }
        let payload: TokenResponse = from_str(&body)
            .map_err(|_| RedditError::InvalidResponse(format!("invalid token payload: {body}")))?;
        if let Some(error) = payload.error {
            return Err(RedditError::InvalidResponse(format!(
                "access token rejected: {error}"
            )));
        }
        match payload.access_token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(RedditError::InvalidResponse("missing token".to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,
    data: Value,
}

#[derive(Debug, Deserialize)]
struct LinkData {
    title: String,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    body: String,
    score: i64,
    created_utc: f64,
    #[serde(default)]
    replies: Replies,
}

/// Reddit sends `""` instead of an empty listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Replies {
    Listing(Listing),
    Empty(IgnoredAny),
}

impl Default for Replies {
    fn default() -> Self {
        Replies::Empty(IgnoredAny)
    }
}

fn parse_thread(body: &str) -> Result<Thread, RedditError> {
    let listings: Vec<Listing> = from_str(body)
        .map_err(|err| RedditError::InvalidResponse(format!("invalid comments payload: {err}")))?;
    let mut listings = listings.into_iter();
    let post = listings.next().ok_or(RedditError::MissingData("post listing"))?;
    let comments = listings
        .next()
        .ok_or(RedditError::MissingData("comment listing"))?;

    let link = post
        .data
        .children
        .into_iter()
        .find(|thing| thing.kind == "t3")
        .ok_or(RedditError::MissingData("post"))?;
    let link: LinkData = decode(link.data)?;

    let mut mapped = Vec::with_capacity(comments.data.children.len());
    for data in comment_payloads(comments) {
        mapped.push(map_comment(decode(data)?)?);
    }
    Ok(Thread {
        title: link.title,
        comments: mapped,
    })
}

// "more" stubs are dropped here.
fn comment_payloads(listing: Listing) -> impl Iterator<Item = Value> {
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t1")
        .map(|thing| thing.data)
}

fn map_comment(data: CommentData) -> Result<ThreadComment, RedditError> {
    let created_at = parse_created(data.created_utc)?;
    let mut replies = Vec::new();
    if let Replies::Listing(listing) = data.replies {
        for reply in comment_payloads(listing) {
            replies.push(map_reply(decode(reply)?)?);
        }
    }
    Ok(ThreadComment {
        body: data.body,
        score: data.score,
        created_at,
        replies,
    })
}

fn map_reply(data: CommentData) -> Result<ThreadReply, RedditError> {
    Ok(ThreadReply {
        created_at: parse_created(data.created_utc)?,
        body: data.body,
        score: data.score,
    })
}

fn decode<T>(value: Value) -> Result<T, RedditError>
where
    T: for<'de> Deserialize<'de>,
{
    from_value(value).map_err(|err| RedditError::InvalidResponse(err.to_string()))
}

fn parse_created(value: f64) -> Result<DateTime<Utc>, RedditError> {
    if !value.is_finite() {
        return Err(RedditError::InvalidTimestamp(value));
    }
    let secs = value.trunc() as i64;
    let nanos = ((value - value.trunc()) * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(secs, nanos).ok_or(RedditError::InvalidTimestamp(value))
}
