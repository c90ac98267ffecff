pub mod api;

pub use api::{RedditClient, RedditEndpoints, RedditError};
