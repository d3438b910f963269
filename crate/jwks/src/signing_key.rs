use std::fmt;

use crate::{
    jwk::{Jwk, OkpJwk},
    kid::derive_kid,
};

/// An Ed25519 public verification key as configured for the publisher.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub kid: String,
    pub raw: Vec<u8>,
}

impl SigningKey {
    #[must_use]
    pub fn new(kid: String, raw: Vec<u8>) -> Self {
        Self { kid, raw }
    }

    /// Build a key whose `kid` is derived from the key bytes.
    #[must_use]
    pub fn with_derived_kid(raw: Vec<u8>) -> Self {
        let kid = derive_kid(&raw);
        Self { kid, raw }
    }

    #[must_use]
    pub fn to_jwk(&self) -> Jwk {
        OkpJwk::ed25519(&self.kid, &self.raw).into()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kid", &self.kid)
            .field("raw", &hex::encode(&self.raw))
            .finish()
    }
}
