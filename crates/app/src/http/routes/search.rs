use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::digest::{self, DigestError, DigestRequest};
use crate::state::AppState;
use threadscout_core::domain::digest::{LengthBounds, PostDigest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub num_comments: Option<i64>,
    pub include_replies: Option<bool>,
}

impl SearchRequest {
    fn into_digest_request(self) -> DigestRequest {
        let defaults = DigestRequest::default();
        DigestRequest {
            query: self.query.unwrap_or_default(),
            lengths: LengthBounds {
                min: self.min_length.unwrap_or(defaults.lengths.min),
                max: self.max_length.unwrap_or(defaults.lengths.max),
            },
            min_date: self.min_date,
            max_date: self.max_date,
            num_comments: self.num_comments.unwrap_or(defaults.num_comments),
            include_replies: self.include_replies.unwrap_or(defaults.include_replies),
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Digest(#[from] DigestError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<PostDigest>>, SearchApiError> {
    let Json(payload) = payload?;
    let request = payload.into_digest_request();
    let posts = digest::run(state.search.as_ref(), state.reddit.as_ref(), &request).await?;
    info!(posts = posts.len(), "search request served");
    Ok(Json(posts))
}

impl IntoResponse for SearchApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            SearchApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            SearchApiError::Digest(DigestError::EmptyQuery) => StatusCode::BAD_REQUEST,
            SearchApiError::Digest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "search request failed");
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
