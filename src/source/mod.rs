//! Where post files come from
//!
//! Loading code only sees the [`PostSource`] trait, so the same pipeline runs
//! against a posts directory, a static web server, or an in-memory fixture.

use std::future::Future;

use serde::{Deserialize, Serialize};

pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::DirSource;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {error}")]
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("unexpected status {code} for {url}")]
    Status {
        code: reqwest::StatusCode,
        url: url::Url,
    },
    #[error("invalid url {0}: {1}")]
    Url(String, url::ParseError),
}

/// Directory index served next to the posts: `{ "posts": ["<name>.md", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostIndex {
    pub posts: Vec<String>,
}

pub trait PostSource {
    /// Human readable location, used in logs and error contexts.
    fn location(&self) -> String;

    /// File names of all posts, in the order they should be considered.
    fn list(&self) -> impl Future<Output = Result<Vec<String>, Error>>;

    /// Raw bytes of one post.
    fn read(&self, name: &str) -> impl Future<Output = Result<Vec<u8>, Error>>;
}
