//! Foundation types for the highscore service.
//!
//! Every other highscore crate depends on `highscore-types`. The types here
//! validate themselves on construction, so a value that exists is always
//! safe to encode and to persist.
//!
//! # Key Types
//!
//! - [`LeaderboardEntry`] — a `(name, score)` pair, unique by name within a leaderboard
//! - [`PackEntry`] — one free-text line of a pack feed
//! - [`Topic`] — filesystem-addressable identifier of one persisted document
//! - [`TopicKind`] — selects the leaderboard or the pack namespace

pub mod entry;
pub mod error;
pub mod topic;

pub use entry::{LeaderboardEntry, PackEntry};
pub use error::TypeError;
pub use topic::{Topic, TopicKind};

/// Maximum number of entries kept in one leaderboard.
pub const MAX_ENTRIES: usize = 999;

/// Maximum number of entries kept in one pack.
pub const MAX_PACK_ENTRIES: usize = 128;

/// Maximum length of a leaderboard name, in bytes.
pub const NAME_MAX_LEN: usize = 16;

/// Maximum length of a pack entry's text, in bytes.
pub const PACK_TEXT_MAX_LEN: usize = 127;

/// Maximum length of a topic name, in bytes.
pub const TOPIC_MAX_LEN: usize = 64;

/// Upper bound of one encoded leaderboard line (without the newline).
pub const ENTRY_MAX_ENCODED_LEN: usize = 128;

/// Upper bound of one encoded pack line (without the newline).
pub const PACK_ENTRY_MAX_ENCODED_LEN: usize = 256;

/// Field delimiter of the line format. Never valid inside names or texts.
pub const DELIMITER: char = '~';
