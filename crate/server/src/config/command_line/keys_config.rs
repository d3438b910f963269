use std::fmt;

use clap::Args;
use seatrace_jwks::KeySources;

/// The Ed25519 verification keys to publish.
///
/// The sources are tried in declaration order and the first one
/// yielding at least one key wins.
#[derive(Default, Args, Clone)]
pub struct KeysConfig {
    /// A complete JWKS document `{"keys": [...]}`.
    /// Only the OKP/Ed25519 entries are kept.
    #[clap(long, env = "SEATRACE_JWKS_JSON", verbatim_doc_comment)]
    pub jwks_json: Option<String>,

    /// A comma separated list of keys, each one `kid:base64` or a bare base64 value.
    /// Both the standard and the URL safe alphabets are accepted.
    #[clap(long, env = "SEATRACE_VERIFY_KEYS", verbatim_doc_comment)]
    pub verify_keys: Option<String>,

    /// A single base64 encoded key; its kid is derived from the key bytes
    #[clap(long, env = "SEATRACE_VERIFY_KEY")]
    pub verify_key: Option<String>,
}

impl From<&KeysConfig> for KeySources {
    fn from(config: &KeysConfig) -> Self {
        Self {
            jwks_json: config.jwks_json.clone(),
            verify_keys: config.verify_keys.clone(),
            verify_key: config.verify_key.clone(),
        }
    }
}

fn describe(value: Option<&String>) -> String {
    value.map_or_else(|| "[not set]".to_owned(), |v| format!("{} chars", v.len()))
}

impl fmt::Debug for KeysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysConfig")
            .field("jwks_json", &describe(self.jwks_json.as_ref()))
            .field("verify_keys", &describe(self.verify_keys.as_ref()))
            .field("verify_key", &describe(self.verify_key.as_ref()))
            .finish()
    }
}
