use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use highscore_types::{Topic, TopicKind};

use crate::error::StoreResult;
use crate::traits::StorageBackend;

/// File-per-topic backend.
///
/// Layout:
/// ```text
/// <root>/highscore/<name>
/// <root>/pack/<name>
/// ```
///
/// Writes go to a temporary file in the target directory which is then
/// renamed over the document, so readers see either the old or the new
/// document and a failed write leaves the old one in place.
#[derive(Clone, Debug)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding all documents of one kind.
    pub fn kind_dir(&self, kind: TopicKind) -> PathBuf {
        self.root.join(kind.prefix())
    }

    /// Path of a topic's document.
    pub fn path(&self, topic: &Topic) -> PathBuf {
        self.kind_dir(topic.kind()).join(topic.name())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, topic: &Topic) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path(topic)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, topic: &Topic, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path(topic);
        let dir = self.kind_dir(topic.kind());

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(path = %path.display(), len = bytes.len(), "document written");
        Ok(())
    }

    fn prepare(&self, topic: &Topic) -> StoreResult<()> {
        fs::create_dir_all(self.kind_dir(topic.kind()))?;
        Ok(())
    }

    fn list(&self, kind: TopicKind) -> StoreResult<Vec<Topic>> {
        let dir = self.kind_dir(kind);
        let read_dir = match fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut topics = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Leftover temp files and foreign files have names that are not
            // valid topics and are skipped.
            if let Some(name) = entry.file_name().to_str() {
                if let Ok(topic) = Topic::new(kind, name) {
                    topics.push(topic);
                }
            }
        }
        topics.sort();
        Ok(topics)
    }
}
