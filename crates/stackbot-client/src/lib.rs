//! HTTP access to a remote game session.
//!
//! - [`Endpoint`] - Where the session lives (protocol, host, port, path prefix, id)
//! - [`GameApi`] - The operations the session driver needs from the server
//! - [`HttpGameApi`] - [`GameApi`] over blocking HTTP requests with a per-request timeout
//! - [`schema`] - JSON bodies returned by the server
//!
//! Every request failure is reported as an [`ApiError`]. Callers are expected to
//! log it and carry on: the next poll is the retry.

pub use self::{api::*, endpoint::*, http::*};

mod api;
mod endpoint;
mod http;
pub mod schema;

use std::io;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ApiError {
    #[display("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: Box<ureq::Transport>,
    },
    #[display("request to {url} returned status {status}: {body:?}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[display("request to {url} returned an empty body")]
    EmptyBody { url: String },
    #[display("failed to read response body from {url}: {source}")]
    Body { url: String, source: io::Error },
    #[display("failed to parse response from {url}: {source} (body: {body:?})")]
    Json {
        url: String,
        body: String,
        source: serde_json::Error,
    },
}
