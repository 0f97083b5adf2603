//! Client side of highscore.
//!
//! A [`TopicTransport`] fetches a topic's document and submits encoded entry
//! lines to it. Two transports are provided:
//!
//! - [`HttpTransport`] talks to a running `highscore serve` over its REST API
//! - [`LocalTransport`] wraps a [`TopicStore`](highscore_store::TopicStore)
//!   in the same process
//!
//! Documents received over HTTP are decoded and verified with the client's
//! own [`Checksummer`](highscore_codec::Checksummer), so the client and the
//! server must share a secret.

pub mod error;
pub mod http;
pub mod local;
pub mod transport;

pub use error::{ClientError, ClientResult};
pub use http::HttpTransport;
pub use local::LocalTransport;
pub use transport::TopicTransport;
