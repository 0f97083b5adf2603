use std::sync::Arc;

use async_trait::async_trait;

use highscore_store::{Document, StorageBackend, StoreResult, TopicStore};
use highscore_types::{Topic, TopicKind};

use crate::error::{ClientError, ClientResult};
use crate::transport::TopicTransport;

/// Transport over a store in this process.
///
/// Store calls block on the store lock and on storage, so they run on
/// tokio's blocking pool.
pub struct LocalTransport<B> {
    store: Arc<TopicStore<B>>,
}

impl<B: StorageBackend + 'static> LocalTransport<B> {
    pub fn new(store: TopicStore<B>) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<TopicStore<B>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<TopicStore<B>> {
        &self.store
    }

    async fn run<T, F>(&self, f: F) -> ClientResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&TopicStore<B>) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| ClientError::Join(e.to_string()))?;
        Ok(result?)
    }
}

#[async_trait]
impl<B: StorageBackend + 'static> TopicTransport for LocalTransport<B> {
    async fn fetch(&self, topic: &Topic) -> ClientResult<Document> {
        let topic = topic.clone();
        self.run(move |store| store.read(&topic)).await
    }

    async fn submit(&self, topic: &Topic, line: &str) -> ClientResult<Document> {
        let topic = topic.clone();
        let line = line.to_string();
        self.run(move |store| store.append(&topic, &line)).await
    }

    async fn list(&self, kind: TopicKind) -> ClientResult<Vec<Topic>> {
        self.run(move |store| store.list_topics(kind)).await
    }
}

impl<B> std::fmt::Debug for LocalTransport<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTransport")
            .field("store", &self.store)
            .finish()
    }
}
