use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use highscore_store::{StorageBackend, TopicStore};

use crate::handler;

/// Build the axum router with all highscore endpoints.
pub fn build_router<B: StorageBackend + 'static>(
    store: Arc<TopicStore<B>>,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/api/highscore", get(handler::list_leaderboards::<B>))
        .route(
            "/api/highscore/:topic",
            get(handler::get_leaderboard::<B>).post(handler::post_leaderboard::<B>),
        )
        .route("/api/pack", get(handler::list_packs::<B>))
        .route(
            "/api/pack/:topic",
            get(handler::get_pack::<B>).post(handler::post_pack::<B>),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
