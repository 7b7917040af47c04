//! Core Error Type
//!
//! Everything that can actually fail in the pipeline: storage I/O,
//! serialization, and remote import. Sanitization never fails by contract.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("no saved manifest at index {0}")]
    NoSuchManifest(usize),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    HttpStatus(reqwest::StatusCode),
}
