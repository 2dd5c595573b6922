//! Fragment codec.
//!
//! ```text
//! ShareState ─json─▶ bytes ─raw deflate─▶ bytes ─base64url, no pad─▶ fragment
//! ```
//!
//! The alphabet is the standard one with `+` as `-` and `/` as `_`, padding
//! stripped. Decoding restores padding from the length.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use super::{ShareError, ShareState};

/// Inflated payloads above this are rejected.
pub const MAX_PAYLOAD: u64 = 8 * 1024 * 1024;

/// Encode `state` into a URL-fragment-safe string.
pub fn encode(state: &ShareState) -> String {
    // serializing a struct of strings cannot fail
    let json = serde_json::to_vec(state).unwrap_or_default();
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // writes into a Vec are infallible
    let _ = encoder.write_all(&json);
    let compressed = encoder.finish().unwrap_or_default();
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decode a fragment, `None` on any malformed input.
pub fn decode(fragment: &str) -> Option<ShareState> {
    match try_decode(fragment) {
        Ok(state) => Some(state),
        Err(err) => {
            crate::debug!("share"; "fragment rejected: {}", err);
            None
        }
    }
}

/// Decode a fragment, reporting why it was rejected.
pub fn try_decode(fragment: &str) -> Result<ShareState, ShareError> {
    let padded = restore_padding(fragment)?;
    let compressed = STANDARD.decode(padded)?;

    let mut json = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .take(MAX_PAYLOAD + 1)
        .read_to_end(&mut json)
        .map_err(ShareError::Inflate)?;
    if json.len() as u64 > MAX_PAYLOAD {
        return Err(ShareError::TooLarge);
    }

    Ok(serde_json::from_slice(&json)?)
}

/// Map back to the standard alphabet and re-pad to a multiple of four.
fn restore_padding(fragment: &str) -> Result<String, ShareError> {
    let mut standard: String = fragment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    match standard.len() % 4 {
        0 => {}
        2 => standard.push_str("=="),
        3 => standard.push('='),
        _ => return Err(ShareError::Length(fragment.len())),
    }
    Ok(standard)
}
