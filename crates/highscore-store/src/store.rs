use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use highscore_board::{Leaderboard, Pack};
use highscore_codec::{decode_document, trim_line, Checksummer, EntryCodec};
use highscore_types::{LeaderboardEntry, PackEntry, Topic, TopicKind};

use crate::document::Document;
use crate::error::StoreResult;
use crate::traits::StorageBackend;

/// Serializes all document access within the process.
///
/// One lock covers every topic: two operations, on the same topic or on
/// different ones, never overlap. The lock is held only for the read (and,
/// for appends, merge and write) of a single call.
pub struct TopicStore<B> {
    backend: B,
    checksummer: Checksummer,
    lock: Mutex<()>,
}

impl<B: StorageBackend> TopicStore<B> {
    /// Store using the default checksum secret.
    pub fn new(backend: B) -> Self {
        Self::with_checksummer(backend, Checksummer::DEFAULT)
    }

    pub fn with_checksummer(backend: B, checksummer: Checksummer) -> Self {
        Self {
            backend,
            checksummer,
            lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn checksummer(&self) -> &Checksummer {
        &self.checksummer
    }

    /// Read and decode a topic. A topic that was never written is empty.
    pub fn read(&self, topic: &Topic) -> StoreResult<Document> {
        let _guard = self.lock();
        let text = self.load_text(topic)?;
        Ok(Document::decode(topic.kind(), &text, &self.checksummer))
    }

    /// Verify one encoded entry line and merge it into the topic.
    ///
    /// Leaderboard topics go through [`Leaderboard::add`], pack topics
    /// through [`Pack::push`]. The entry is decoded before the lock is
    /// taken, so a rejected entry never reaches storage. Returns the document
    /// as written.
    pub fn append(&self, topic: &Topic, raw: &str) -> StoreResult<Document> {
        let raw = trim_line(raw);
        match topic.kind() {
            TopicKind::Leaderboard => {
                let entry = LeaderboardEntry::decode(raw, &self.checksummer)?;
                let _guard = self.lock();
                let mut board = Leaderboard::from_entries(self.load(topic)?);
                let outcome = board.add(entry);
                debug!(%topic, ?outcome, size = board.len(), "leaderboard merge");
                self.persist(topic, Document::Leaderboard(board))
            }
            TopicKind::Pack => {
                let entry = PackEntry::decode(raw, &self.checksummer)?;
                let _guard = self.lock();
                let mut pack = Pack::from_entries(self.load(topic)?);
                let evicted = pack.push(entry);
                debug!(%topic, evicted, size = pack.len(), "pack push");
                self.persist(topic, Document::Pack(pack))
            }
        }
    }

    /// Topics of one kind that have a document.
    pub fn list_topics(&self, kind: TopicKind) -> StoreResult<Vec<Topic>> {
        let _guard = self.lock();
        self.backend.list(kind)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().expect("topic store lock poisoned")
    }

    fn load_text(&self, topic: &Topic) -> StoreResult<String> {
        Ok(self
            .backend
            .read(topic)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default())
    }

    fn load<E: EntryCodec>(&self, topic: &Topic) -> StoreResult<Vec<E>> {
        let text = self.load_text(topic)?;
        Ok(decode_document(&text, &self.checksummer))
    }

    /// Encode and write. Must be called with the lock held.
    fn persist(&self, topic: &Topic, document: Document) -> StoreResult<Document> {
        let text = document.encode(&self.checksummer);
        if let Err(e) = self.backend.prepare(topic) {
            warn!(%topic, error = %e, "could not prepare topic storage");
        }
        if let Err(e) = self.backend.write(topic, text.as_bytes()) {
            warn!(%topic, error = %e, "document write failed");
            return Err(e);
        }
        Ok(document)
    }
}

impl<B> std::fmt::Debug for TopicStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicStore")
            .field("checksummer", &self.checksummer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::InMemoryBackend;
    use highscore_codec::{encode_document, CodecError};
    use highscore_types::MAX_PACK_ENTRIES;

    const C: Checksummer = Checksummer::DEFAULT;

    fn store() -> TopicStore<InMemoryBackend> {
        TopicStore::new(InMemoryBackend::new())
    }

    fn score_line(name: &str, score: i32) -> String {
        LeaderboardEntry::new(name, score).unwrap().encode(&C)
    }

    fn pack_line(text: &str) -> String {
        PackEntry::new(text).unwrap().encode(&C)
    }

    fn board_topic() -> Topic {
        Topic::leaderboard("tetris").unwrap()
    }

    #[test]
    fn read_missing_topic_is_empty() {
        let s = store();
        let doc = s.read(&board_topic()).unwrap();
        assert_eq!(doc, Document::Leaderboard(Leaderboard::new()));
        let doc = s.read(&Topic::pack("news").unwrap()).unwrap();
        assert_eq!(doc, Document::Pack(Pack::new()));
    }

    #[test]
    fn append_then_read() {
        let s = store();
        let t = board_topic();
        s.append(&t, &score_line("alice", 10)).unwrap();
        s.append(&t, &score_line("bob", 20)).unwrap();
        let doc = s.read(&t).unwrap();
        let board = doc.as_leaderboard().unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["bob", "alice"]);
    }

    #[test]
    fn append_returns_new_document() {
        let s = store();
        let doc = s.append(&board_topic(), &score_line("alice", 10)).unwrap();
        assert_eq!(doc.len(), 1);
        let stored = s.backend().read(&board_topic()).unwrap().unwrap();
        assert_eq!(String::from_utf8(stored).unwrap(), doc.encode(&C));
    }

    #[test]
    fn append_keeps_best_score() {
        let s = store();
        let t = board_topic();
        s.append(&t, &score_line("A", 10)).unwrap();
        s.append(&t, &score_line("A", 5)).unwrap();
        let doc = s.read(&t).unwrap();
        assert_eq!(
            doc.as_leaderboard().unwrap().entries(),
            [LeaderboardEntry::new("A", 10).unwrap()]
        );
    }

    #[test]
    fn trailing_newline_is_accepted() {
        let s = store();
        let line = format!("{}\r\n", score_line("alice", 1));
        assert!(s.append(&board_topic(), &line).is_ok());
    }

    #[test]
    fn pack_text_ending_in_whitespace_is_kept_intact() {
        let s = store();
        let t = Topic::pack("news").unwrap();
        for text in ["tab\t", "nbsp\u{a0}", "ideo\u{3000}"] {
            let doc = s.append(&t, &format!("{}\n", pack_line(text))).unwrap();
            assert_eq!(doc.as_pack().unwrap().latest().unwrap().text(), text);
        }
        let doc = s.read(&t).unwrap();
        let texts: Vec<&str> = doc.as_pack().unwrap().iter().map(|e| e.text()).collect();
        assert_eq!(texts, ["ideo\u{3000}", "nbsp\u{a0}", "tab\t"]);
    }

    #[test]
    fn rejected_entry_does_not_touch_storage() {
        let s = store();
        let forged = score_line("alice", 10).replacen("10~", "99~", 1);
        let err = s.append(&board_topic(), &forged).unwrap_err();
        assert!(err.is_rejected());
        assert!(matches!(
            err,
            StoreError::Rejected(CodecError::ChecksumMismatch { .. })
        ));
        assert_eq!(s.backend().write_count(), 0);
    }

    #[test]
    fn pack_line_rejected_on_leaderboard_topic() {
        let s = store();
        let err = s.append(&board_topic(), &pack_line("hi")).unwrap_err();
        assert!(err.is_rejected());
    }

    #[test]
    fn secret_mismatch_is_rejected() {
        let s = TopicStore::with_checksummer(InMemoryBackend::new(), Checksummer::new(43).unwrap());
        assert!(s.append(&board_topic(), &score_line("alice", 1)).is_err());
        let own = LeaderboardEntry::new("alice", 1)
            .unwrap()
            .encode(&Checksummer::new(43).unwrap());
        assert!(s.append(&board_topic(), &own).is_ok());
    }

    #[test]
    fn failed_write_is_reported_and_old_document_survives() {
        let s = store();
        let t = board_topic();
        s.append(&t, &score_line("alice", 10)).unwrap();

        s.backend().set_fail_writes(true);
        let err = s.append(&t, &score_line("bob", 99)).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!err.is_rejected());

        s.backend().set_fail_writes(false);
        let doc = s.read(&t).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.as_leaderboard().unwrap().get("bob").is_none());
    }

    #[test]
    fn corrupt_lines_in_storage_are_dropped_on_next_write() {
        let s = store();
        let t = board_topic();
        let good = score_line("alice", 10);
        s.backend()
            .insert_raw(t.clone(), format!("{good}\n10~hacker~1\ngarbage\n"));

        assert_eq!(s.read(&t).unwrap().len(), 1);
        s.append(&t, &score_line("bob", 5)).unwrap();
        let stored = String::from_utf8(s.backend().read(&t).unwrap().unwrap()).unwrap();
        assert!(!stored.contains("hacker"));
        assert!(!stored.contains("garbage"));
        assert_eq!(stored.lines().count(), 2);
    }

    #[test]
    fn invalid_utf8_in_storage_is_tolerated() {
        let s = store();
        let t = board_topic();
        let mut bytes = score_line("alice", 10).into_bytes();
        bytes.extend_from_slice(b"\n\xff\xfe~bad\n");
        s.backend().insert_raw(t.clone(), bytes);
        assert_eq!(s.read(&t).unwrap().len(), 1);
    }

    #[test]
    fn pack_fifo() {
        let s = store();
        let t = Topic::pack("news").unwrap();
        for text in ["a", "b", "c"] {
            s.append(&t, &pack_line(text)).unwrap();
        }
        let doc = s.read(&t).unwrap();
        let texts: Vec<&str> = doc.as_pack().unwrap().iter().map(|e| e.text()).collect();
        assert_eq!(texts, ["c", "b", "a"]);
    }

    #[test]
    fn pack_capacity() {
        let s = store();
        let t = Topic::pack("news").unwrap();
        let seed: Vec<PackEntry> = (0..MAX_PACK_ENTRIES)
            .map(|i| PackEntry::new(format!("m{i}")).unwrap())
            .collect();
        s.backend().insert_raw(t.clone(), encode_document(&seed, &C));

        let doc = s.append(&t, &pack_line("fresh")).unwrap();
        let pack = doc.as_pack().unwrap();
        assert_eq!(pack.len(), MAX_PACK_ENTRIES);
        assert_eq!(pack.latest().unwrap().text(), "fresh");
        assert!(pack.iter().all(|e| e.text() != format!("m{}", MAX_PACK_ENTRIES - 1)));
    }

    #[test]
    fn list_topics() {
        let s = store();
        s.append(&Topic::leaderboard("b").unwrap(), &score_line("x", 1)).unwrap();
        s.append(&Topic::leaderboard("a").unwrap(), &score_line("x", 1)).unwrap();
        s.append(&Topic::pack("p").unwrap(), &pack_line("x")).unwrap();
        let boards = s.list_topics(TopicKind::Leaderboard).unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].name(), "a");
        assert_eq!(s.list_topics(TopicKind::Pack).unwrap().len(), 1);
    }
}
