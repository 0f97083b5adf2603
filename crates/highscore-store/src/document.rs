use serde::Serialize;

use highscore_board::{Leaderboard, Pack};
use highscore_codec::{decode_document, encode_document, Checksummer};
use highscore_types::TopicKind;

/// Decoded contents of one topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum Document {
    Leaderboard(Leaderboard),
    Pack(Pack),
}

impl Document {
    /// Empty document of the given kind.
    pub fn empty(kind: TopicKind) -> Self {
        match kind {
            TopicKind::Leaderboard => Self::Leaderboard(Leaderboard::new()),
            TopicKind::Pack => Self::Pack(Pack::new()),
        }
    }

    /// Decode document text, dropping invalid lines.
    pub fn decode(kind: TopicKind, text: &str, checksummer: &Checksummer) -> Self {
        match kind {
            TopicKind::Leaderboard => {
                Self::Leaderboard(Leaderboard::from_entries(decode_document(text, checksummer)))
            }
            TopicKind::Pack => Self::Pack(Pack::from_entries(decode_document(text, checksummer))),
        }
    }

    pub fn encode(&self, checksummer: &Checksummer) -> String {
        match self {
            Self::Leaderboard(board) => encode_document(board, checksummer),
            Self::Pack(pack) => encode_document(pack, checksummer),
        }
    }

    pub fn kind(&self) -> TopicKind {
        match self {
            Self::Leaderboard(_) => TopicKind::Leaderboard,
            Self::Pack(_) => TopicKind::Pack,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Leaderboard(board) => board.len(),
            Self::Pack(pack) => pack.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_leaderboard(&self) -> Option<&Leaderboard> {
        match self {
            Self::Leaderboard(board) => Some(board),
            Self::Pack(_) => None,
        }
    }

    pub fn as_pack(&self) -> Option<&Pack> {
        match self {
            Self::Pack(pack) => Some(pack),
            Self::Leaderboard(_) => None,
        }
    }
}
