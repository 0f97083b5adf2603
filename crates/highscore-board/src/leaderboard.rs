use serde::Serialize;
use tracing::debug;

use highscore_types::{LeaderboardEntry, MAX_ENTRIES};

/// What [`Leaderboard::add`] did with the offered entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// New name, inserted at its rank.
    Inserted,
    /// Existing name with a strictly higher score; the old entry was replaced.
    Improved { previous: i32 },
    /// Existing name whose score was not beaten; nothing moved.
    Kept { existing: i32 },
    /// New name, but it ranked below a full board and was dropped.
    Overflowed,
}

impl AddOutcome {
    /// Whether the offered entry is now on the board.
    pub fn accepted(&self) -> bool {
        matches!(self, Self::Inserted | Self::Improved { .. })
    }
}

/// Ordered leaderboard.
///
/// Invariants maintained by [`Leaderboard::add`]:
/// - at most [`MAX_ENTRIES`] entries
/// - sorted by score, descending; equal scores keep insertion order
/// - at most one entry per name
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap decoded entries as-is, in document order.
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }

    /// Merge one entry into the board.
    ///
    /// Duplicate names left over in the document are collapsed to the first
    /// occurrence before the merge. An existing name is only replaced by a
    /// strictly higher score.
    pub fn add(&mut self, entry: LeaderboardEntry) -> AddOutcome {
        self.collapse_duplicates(entry.name());

        let outcome = match self.position(entry.name()) {
            Some(idx) if entry.score() > self.entries[idx].score() => {
                let previous = self.entries.remove(idx).score();
                self.insert_sorted(entry);
                AddOutcome::Improved { previous }
            }
            Some(idx) => AddOutcome::Kept {
                existing: self.entries[idx].score(),
            },
            None => {
                if self.insert_sorted(entry) < MAX_ENTRIES {
                    AddOutcome::Inserted
                } else {
                    AddOutcome::Overflowed
                }
            }
        };

        self.entries.truncate(MAX_ENTRIES);
        outcome
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// 1-based rank of a name.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.position(name).map(|idx| idx + 1)
    }

    /// The best `n` entries (fewer if the board is shorter).
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeaderboardEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    fn collapse_duplicates(&mut self, name: &str) {
        let mut seen = false;
        let before = self.entries.len();
        self.entries.retain(|e| {
            if e.name() != name {
                return true;
            }
            !std::mem::replace(&mut seen, true)
        });
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(name, removed, "collapsed duplicate leaderboard names");
        }
    }

    /// Insert before the first strictly lower score. Returns the index used.
    fn insert_sorted(&mut self, entry: LeaderboardEntry) -> usize {
        let idx = self
            .entries
            .iter()
            .position(|e| e.score() < entry.score())
            .unwrap_or(self.entries.len());
        self.entries.insert(idx, entry);
        idx
    }
}

impl From<Vec<LeaderboardEntry>> for Leaderboard {
    fn from(entries: Vec<LeaderboardEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a LeaderboardEntry;
    type IntoIter = std::slice::Iter<'a, LeaderboardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
