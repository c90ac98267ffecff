use std::fmt::Display;
use std::future::Future;

use threadscout_core::domain::thread::Thread;
use threadscout_core::types::post_id::PostId;
use threadscout_infra::google::{GoogleSearchClient, GoogleSearchError};
use threadscout_infra::reddit::{RedditClient, RedditError};

/// Turns a free-text query into candidate post URLs, best match first.
pub trait PostFinder: Send + Sync {
    type Error: Display + Send;

    fn find_posts(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Loads a post's title and comment tree.
pub trait ThreadSource: Send + Sync {
    type Error: Display + Send;

    fn fetch_thread(
        &self,
        post_id: &PostId,
    ) -> impl Future<Output = Result<Thread, Self::Error>> + Send;
}

impl PostFinder for GoogleSearchClient {
    type Error = GoogleSearchError;

    async fn find_posts(&self, query: &str) -> Result<Vec<String>, Self::Error> {
        GoogleSearchClient::find_posts(self, query).await
    }
}

impl ThreadSource for RedditClient {
    type Error = RedditError;

    async fn fetch_thread(&self, post_id: &PostId) -> Result<Thread, Self::Error> {
        RedditClient::fetch_thread(self, post_id).await
    }
}
