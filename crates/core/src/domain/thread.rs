use chrono::{DateTime, Utc};

/// A post as fetched from the discussion platform, "load more" stubs removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub title: String,
    pub comments: Vec<ThreadComment>,
}

/// Top-level comment in platform order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadComment {
    pub body: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<ThreadReply>,
}

/// Direct reply to a [`ThreadComment`]; deeper nesting is not fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadReply {
    pub body: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}
