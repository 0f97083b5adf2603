//! Text codec for highscore documents.
//!
//! A document is a newline-separated list of records. Every record carries a
//! checksum computed from its semantic fields and a shared secret, so lines
//! that were edited by hand (or written by a process with another secret)
//! are detected and dropped on decode.
//!
//! # Line Formats
//!
//! ```text
//! leaderboard: <score>~<name>~<checksum>
//! pack:        <checksum>~<text>
//! ```
//!
//! # Components
//!
//! - [`Checksummer`] — the multiplicative string hash seeded with the secret
//! - [`EntryCodec`] — encode/decode of a single line, implemented for both entry types
//! - [`encode_document`] / [`decode_document`] — whole documents, skipping bad lines
//!
//! Encode always recomputes the checksum and decode always verifies it; a
//! stored checksum is never trusted on its own.

pub mod checksum;
pub mod document;
pub mod entry;
pub mod error;

pub use checksum::Checksummer;
pub use document::{
    decode_document, encode_document, inspect_document, trim_line, DocumentReport,
    RejectedLine,
};
pub use entry::EntryCodec;
pub use error::{CodecError, CodecResult};
