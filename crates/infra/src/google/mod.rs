pub mod custom_search;

pub use custom_search::{DEFAULT_BASE_URL, GoogleSearchClient, GoogleSearchError, MAX_RESULTS};
