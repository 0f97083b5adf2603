//! In-memory document views for highscore topics.
//!
//! - [`Leaderboard`] — deduplicated, score-descending, capped at [`MAX_ENTRIES`]
//! - [`Pack`] — newest-first FIFO feed, capped at [`MAX_PACK_ENTRIES`]
//!
//! Both are transient: they are built from a decoded document, mutated by a
//! single operation, and encoded back. Nothing here does I/O or locking.
//!
//! [`MAX_ENTRIES`]: highscore_types::MAX_ENTRIES
//! [`MAX_PACK_ENTRIES`]: highscore_types::MAX_PACK_ENTRIES

pub mod leaderboard;
pub mod pack;

pub use leaderboard::{AddOutcome, Leaderboard};
pub use pack::Pack;
