//! HTTP server for highscore.
//!
//! Serves leaderboard and pack topics as plain text. A `GET` returns the
//! topic's encoded document; a `POST` body is one encoded entry line which
//! is verified and merged, and the response is the updated document.
//!
//! ```text
//! GET  /api/highscore            list leaderboard topics
//! GET  /api/highscore/:topic     read a leaderboard (?format=json for JSON)
//! POST /api/highscore/:topic     submit "<score>~<name>~<checksum>"
//! GET  /api/pack                 list pack topics
//! GET  /api/pack/:topic          read a pack
//! POST /api/pack/:topic          submit "<checksum>~<text>"
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::HealthResponse;
pub use router::build_router;
pub use server::HighscoreServer;
