use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub modules: HealthModules,
}

#[derive(Debug, Serialize)]
pub struct HealthModules {
    pub search: UpstreamStatus,
    pub reddit: UpstreamStatus,
}

#[derive(Debug, Serialize)]
pub struct UpstreamStatus {
    pub configured: bool,
}

/// Reports configuration only; upstreams are not contacted.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = &state.config;
    Json(HealthResponse {
        status: "ok",
        modules: HealthModules {
            search: UpstreamStatus {
                configured: !config.google_api_key.is_empty() && !config.google_cx.is_empty(),
            },
            reddit: UpstreamStatus {
                configured: !config.reddit_client_id.is_empty()
                    && !config.reddit_secret.is_empty(),
            },
        },
    })
}
