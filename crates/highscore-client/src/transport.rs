use async_trait::async_trait;

use highscore_store::Document;
use highscore_types::{Topic, TopicKind};

use crate::error::ClientResult;

/// Access to the topics of a highscore store, local or remote.
#[async_trait]
pub trait TopicTransport: Send + Sync {
    /// Current document of a topic. A topic that was never written is empty.
    async fn fetch(&self, topic: &Topic) -> ClientResult<Document>;

    /// Submit one encoded entry line and receive the updated document.
    async fn submit(&self, topic: &Topic, line: &str) -> ClientResult<Document>;

    /// Topics of one kind that have a document.
    async fn list(&self, kind: TopicKind) -> ClientResult<Vec<Topic>>;
}
