pub mod sources;

use thiserror::Error;
use tracing::{debug, info};

use threadscout_core::CoreError;
use threadscout_core::domain::digest::{
    CommentSelection, LengthBounds, PostDigest, retain_by_length, select_comments,
};
use threadscout_core::types::date_range::DateRange;
use threadscout_core::types::post_id::PostId;

pub use sources::{PostFinder, ThreadSource};

/// One search-and-filter job, already decoded from the wire.
#[derive(Debug, Clone)]
pub struct DigestRequest {
    pub query: String,
    pub lengths: LengthBounds,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub num_comments: i64,
    pub include_replies: bool,
}

impl Default for DigestRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            lengths: LengthBounds::default(),
            min_date: None,
            max_date: None,
            num_comments: 5,
            include_replies: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Query parameter is required")]
    EmptyQuery,
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("unsupported post url: {0}")]
    UnsupportedUrl(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("failed to fetch post {post_id}: {message}")]
    Thread { post_id: String, message: String },
}

impl From<CoreError> for DigestError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDate(value) => DigestError::InvalidDate(value),
            CoreError::UnsupportedUrl(value) => DigestError::UnsupportedUrl(value),
        }
    }
}

/// Searches, then fetches and filters each post in search order. Any
/// failure aborts the whole digest.
pub async fn run<F, S>(
    finder: &F,
    threads: &S,
    request: &DigestRequest,
) -> Result<Vec<PostDigest>, DigestError>
where
    F: PostFinder,
    S: ThreadSource,
{
    let query = validate_query(&request.query)?;
    let range = DateRange::parse(request.min_date.as_deref(), request.max_date.as_deref())?;
    let selection = CommentSelection {
        want_count: usize::try_from(request.num_comments).unwrap_or(0),
        range,
        include_replies: request.include_replies,
    };

    let urls = finder
        .find_posts(query)
        .await
        .map_err(|err| DigestError::Search(err.to_string()))?;
    info!(query = %query, results = urls.len(), "post search complete");

    let mut posts = Vec::with_capacity(urls.len());
    for url in urls {
        let post_id = PostId::try_from(url.as_str())?;
        let thread = threads
            .fetch_thread(&post_id)
            .await
            .map_err(|err| DigestError::Thread {
                post_id: post_id.to_string(),
                message: err.to_string(),
            })?;
        let fetched = thread.comments.len();
        let mut comments = select_comments(thread.comments, &selection);
        retain_by_length(&mut comments, &request.lengths);
        if comments.is_empty() {
            debug!(%post_id, fetched, "no comments survived filtering; dropping post");
            continue;
        }
        debug!(%post_id, fetched, kept = comments.len(), "post digested");
        posts.push(PostDigest {
            url,
            title: thread.title,
            comments,
        });
    }
    Ok(posts)
}

// Only the empty string is rejected; whitespace is passed through to search.
fn validate_query(query: &str) -> Result<&str, DigestError> {
    if query.is_empty() {
        return Err(DigestError::EmptyQuery);
    }
    Ok(query)
}
