use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use highscore_codec::Checksummer;
use highscore_store::{Document, StorageBackend, StoreResult, TopicStore};
use highscore_types::{Topic, TopicKind};

use crate::error::{ServerError, ServerResult};

/// Shared handler state.
pub type SharedStore<B> = Arc<TopicStore<B>>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Query parameters for document reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReadParams {
    /// `json` for a JSON body; anything else returns the stored text format.
    pub format: Option<String>,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "highscore-server",
        "version": env!("CARGO_PKG_VERSION"),
        "max_entries": highscore_types::MAX_ENTRIES,
        "max_pack_entries": highscore_types::MAX_PACK_ENTRIES,
    }))
}

pub async fn get_leaderboard<B: StorageBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(name): Path<String>,
    Query(params): Query<ReadParams>,
) -> ServerResult<Response> {
    read_topic(store, TopicKind::Leaderboard, name, params).await
}

pub async fn post_leaderboard<B: StorageBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(name): Path<String>,
    body: String,
) -> ServerResult<Response> {
    append_topic(store, TopicKind::Leaderboard, name, body).await
}

pub async fn list_leaderboards<B: StorageBackend + 'static>(
    State(store): State<SharedStore<B>>,
) -> ServerResult<Response> {
    list_topics(store, TopicKind::Leaderboard).await
}

pub async fn get_pack<B: StorageBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(name): Path<String>,
    Query(params): Query<ReadParams>,
) -> ServerResult<Response> {
    read_topic(store, TopicKind::Pack, name, params).await
}

pub async fn post_pack<B: StorageBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(name): Path<String>,
    body: String,
) -> ServerResult<Response> {
    append_topic(store, TopicKind::Pack, name, body).await
}

pub async fn list_packs<B: StorageBackend + 'static>(
    State(store): State<SharedStore<B>>,
) -> ServerResult<Response> {
    list_topics(store, TopicKind::Pack).await
}

async fn read_topic<B: StorageBackend + 'static>(
    store: SharedStore<B>,
    kind: TopicKind,
    name: String,
    params: ReadParams,
) -> ServerResult<Response> {
    let topic = Topic::new(kind, name)?;
    let s = Arc::clone(&store);
    let doc = blocking(move || s.read(&topic)).await?;
    Ok(render(&doc, store.checksummer(), &params))
}

async fn append_topic<B: StorageBackend + 'static>(
    store: SharedStore<B>,
    kind: TopicKind,
    name: String,
    body: String,
) -> ServerResult<Response> {
    let topic = Topic::new(kind, name)?;
    let s = Arc::clone(&store);
    let doc = blocking(move || s.append(&topic, &body)).await?;
    Ok(render(&doc, store.checksummer(), &ReadParams::default()))
}

async fn list_topics<B: StorageBackend + 'static>(
    store: SharedStore<B>,
    kind: TopicKind,
) -> ServerResult<Response> {
    let topics = blocking(move || store.list_topics(kind)).await?;
    let mut body = String::new();
    for topic in &topics {
        body.push_str(topic.name());
        body.push('\n');
    }
    Ok(text_response(body))
}

/// Run a store call off the async runtime.
async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}

fn render(doc: &Document, checksummer: &Checksummer, params: &ReadParams) -> Response {
    match params.format.as_deref() {
        Some("json") => Json(doc).into_response(),
        _ => text_response(doc.encode(checksummer)),
    }
}

fn text_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
