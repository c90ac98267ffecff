use std::sync::Arc;

use crate::config::AppConfig;
use threadscout_infra::google::GoogleSearchClient;
use threadscout_infra::reddit::RedditClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub search: Arc<GoogleSearchClient>,
    pub reddit: Arc<RedditClient>,
}
