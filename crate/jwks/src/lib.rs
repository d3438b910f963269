//! Public key publication for SeaTrace.
//!
//! * [`loader`] reads Ed25519 verification keys from configuration
//! * [`export`] derives a public RSA/EC JWKS from a PEM private key
//! * [`jwk`] models the JSON documents both produce

pub mod base64url;
pub mod error;
pub mod export;
pub mod jwk;
pub mod kid;
pub mod loader;
mod signing_key;

pub use error::{JwksError, JwksResult};
pub use export::{DEFAULT_EXPORT_KID, ExportedJwks, PublicKeyMaterial, export_public_jwks};
pub use jwk::{Jwk, JwksDocument};
pub use loader::{KeySource, KeySources, load_signing_keys};
pub use signing_key::SigningKey;
