//! Base64 helpers for key material.
//!
//! Configured keys come from hand-edited environment files, so decoding is
//! lenient: standard or URL-safe alphabet, with or without padding, and
//! with arbitrary whitespace. Encoding is always base64url without padding,
//! as required for JWK members.

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

use crate::error::JwksResult;

/// Encode bytes as base64url without padding.
#[must_use]
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode standard or URL-safe base64, padded or not, ignoring whitespace.
///
/// # Errors
///
/// Returns `JwksError::Base64` when the normalized text is not valid base64.
pub fn decode_any_base64(value: &str) -> JwksResult<Vec<u8>> {
    let mut normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let pad = (4 - normalized.len() % 4) % 4;
    normalized.extend(std::iter::repeat_n('=', pad));
    Ok(STANDARD.decode(normalized)?)
}
