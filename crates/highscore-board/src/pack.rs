use std::collections::VecDeque;

use serde::Serialize;

use highscore_types::{PackEntry, MAX_PACK_ENTRIES};

/// Newest-first feed of free-text entries, capped at [`MAX_PACK_ENTRIES`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pack {
    entries: VecDeque<PackEntry>,
}

impl Pack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap decoded entries as-is; the first entry is the newest.
    pub fn from_entries(entries: Vec<PackEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Push a new entry to the front, evicting from the tail past capacity.
    /// Returns the number of evicted entries.
    pub fn push(&mut self, entry: PackEntry) -> usize {
        self.entries.push_front(entry);
        let evicted = self.entries.len().saturating_sub(MAX_PACK_ENTRIES);
        self.entries.truncate(MAX_PACK_ENTRIES);
        evicted
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&PackEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, PackEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<PackEntry> {
        self.entries.into()
    }
}

impl From<Vec<PackEntry>> for Pack {
    fn from(entries: Vec<PackEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl<'a> IntoIterator for &'a Pack {
    type Item = &'a PackEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, PackEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
