use openssl::sha::sha256;

use crate::base64url::encode_base64url;

/// Number of hex characters kept from the SHA-256 digest.
pub const DERIVED_KID_LENGTH: usize = 16;

/// Derive a key id from the base64url text of a public key.
///
/// The id is the first 16 lowercase hex characters of SHA-256 over the UTF-8
/// bytes of `x_base64url`.
#[must_use]
pub fn kid_from_x(x_base64url: &str) -> String {
    let mut kid = hex::encode(sha256(x_base64url.as_bytes()));
    kid.truncate(DERIVED_KID_LENGTH);
    kid
}

/// Derive a key id from raw public key bytes, using their canonical
/// base64url (unpadded) encoding.
#[must_use]
pub fn derive_kid(raw: &[u8]) -> String {
    kid_from_x(&encode_base64url(raw))
}
