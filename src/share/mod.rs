//! Shareable session state carried in the URL fragment.
//!
//! - `codec`: `ShareState` to fragment and back
//! - `fragment`: echo-suppressing binding to the location, permalink helpers

pub mod codec;
mod fragment;

pub use codec::{decode, encode, try_decode};
pub use fragment::{FragmentSync, fragment_of, permalink};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything a permalink restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareState {
    pub source: String,
}

impl ShareState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid fragment length {0}")]
    Length(usize),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid deflate stream: {0}")]
    Inflate(std::io::Error),

    #[error("payload exceeds {} bytes", codec::MAX_PAYLOAD)]
    TooLarge,

    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),
}
