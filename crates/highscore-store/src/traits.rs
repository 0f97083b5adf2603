use highscore_types::{Topic, TopicKind};

use crate::error::StoreResult;

/// Byte storage for topic documents.
///
/// Implementations are plain key-value stores: they never interpret the
/// bytes, and they are not required to serialize callers. Serialization of
/// read-modify-write cycles is the [`TopicStore`](crate::TopicStore)'s job.
pub trait StorageBackend: Send + Sync {
    /// Read a topic's document.
    ///
    /// Returns `Ok(None)` if the topic has never been written.
    fn read(&self, topic: &Topic) -> StoreResult<Option<Vec<u8>>>;

    /// Replace a topic's document.
    ///
    /// On error the previous document must still be readable.
    fn write(&self, topic: &Topic, bytes: &[u8]) -> StoreResult<()>;

    /// Make sure the topic can be written (e.g. create its directory).
    ///
    /// Best-effort: callers log a failure and attempt the write anyway.
    fn prepare(&self, _topic: &Topic) -> StoreResult<()> {
        Ok(())
    }

    /// All topics of one kind that currently have a document, sorted.
    fn list(&self, kind: TopicKind) -> StoreResult<Vec<Topic>>;
}
