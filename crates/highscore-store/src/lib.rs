//! Topic storage for the highscore service.
//!
//! A topic's persisted document is the single source of truth. Each
//! operation decodes it into a transient [`Leaderboard`] or [`Pack`], applies
//! at most one mutation, encodes it, and writes it back, all inside one
//! critical section owned by the [`TopicStore`].
//!
//! # Storage Backends
//!
//! All backends implement the [`StorageBackend`] trait:
//!
//! - [`FsBackend`] -- one text file per topic under a root directory
//! - [`InMemoryBackend`] -- `HashMap`-based backend for tests and embedding
//!
//! # Design Rules
//!
//! 1. A missing document is an empty document, never an error.
//! 2. Entries are decoded and verified before the lock is taken; rejected
//!    entries never touch storage.
//! 3. Read, merge and write of one append happen under a single lock
//!    acquisition, so concurrent appends are totally ordered.
//! 4. A failed write is reported to the caller and not retried; the previous
//!    document stays authoritative.
//!
//! [`Leaderboard`]: highscore_board::Leaderboard
//! [`Pack`]: highscore_board::Pack

pub mod document;
pub mod error;
pub mod fs;
pub mod memory;
pub mod store;
pub mod traits;

pub use document::Document;
pub use error::{StoreError, StoreResult};
pub use fs::FsBackend;
pub use memory::InMemoryBackend;
pub use store::TopicStore;
pub use traits::StorageBackend;
