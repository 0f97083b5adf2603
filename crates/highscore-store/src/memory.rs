use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use highscore_types::{Topic, TopicKind};

use crate::error::StoreResult;
use crate::traits::StorageBackend;

/// In-memory, HashMap-based backend.
///
/// Intended for tests and embedding. Writes can be made to fail on demand
/// to exercise storage-failure paths.
pub struct InMemoryBackend {
    documents: RwLock<HashMap<Topic, Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Store raw bytes for a topic, bypassing the codec.
    pub fn insert_raw(&self, topic: Topic, bytes: impl Into<Vec<u8>>) {
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(topic, bytes.into());
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self, topic: &Topic) -> StoreResult<Option<Vec<u8>>> {
        let map = self.documents.read().expect("lock poisoned");
        Ok(map.get(topic).cloned())
    }

    fn write(&self, topic: &Topic, bytes: &[u8]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected write failure").into());
        }
        let mut map = self.documents.write().expect("lock poisoned");
        map.insert(topic.clone(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn list(&self, kind: TopicKind) -> StoreResult<Vec<Topic>> {
        let map = self.documents.read().expect("lock poisoned");
        let mut topics: Vec<Topic> = map.keys().filter(|t| t.kind() == kind).cloned().collect();
        topics.sort();
        Ok(topics)
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("document_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing() {
        let mem = InMemoryBackend::new();
        assert!(mem.read(&Topic::leaderboard("x").unwrap()).unwrap().is_none());
        assert!(mem.is_empty());
    }

    #[test]
    fn write_and_read() {
        let mem = InMemoryBackend::new();
        let t = Topic::pack("x").unwrap();
        mem.write(&t, b"data").unwrap();
        assert_eq!(mem.read(&t).unwrap().unwrap(), b"data");
        assert_eq!(mem.write_count(), 1);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn injected_failure_keeps_old_document() {
        let mem = InMemoryBackend::new();
        let t = Topic::leaderboard("x").unwrap();
        mem.write(&t, b"old").unwrap();
        mem.set_fail_writes(true);
        assert!(mem.write(&t, b"new").is_err());
        assert_eq!(mem.read(&t).unwrap().unwrap(), b"old");
        mem.set_fail_writes(false);
        mem.write(&t, b"new").unwrap();
        assert_eq!(mem.read(&t).unwrap().unwrap(), b"new");
    }

    #[test]
    fn list_by_kind() {
        let mem = InMemoryBackend::new();
        mem.insert_raw(Topic::pack("p").unwrap(), "");
        mem.insert_raw(Topic::leaderboard("z").unwrap(), "");
        mem.insert_raw(Topic::leaderboard("a").unwrap(), "");
        let boards = mem.list(TopicKind::Leaderboard).unwrap();
        assert_eq!(
            boards,
            vec![Topic::leaderboard("a").unwrap(), Topic::leaderboard("z").unwrap()]
        );
        assert_eq!(mem.list(TopicKind::Pack).unwrap().len(), 1);
    }
}
