//! Ed25519 verification keys from configuration.
//!
//! Three configuration shapes are supported, tried in order; the first one
//! that yields at least one key wins:
//!
//! 1. `SEATRACE_JWKS_JSON`: a JSON key set, only `OKP`/`Ed25519` entries are kept
//! 2. `SEATRACE_VERIFY_KEYS`: comma separated `kid:base64` or bare `base64` entries
//! 3. `SEATRACE_VERIFY_KEY`: a single bare `base64` key
//!
//! A malformed source is logged and skipped. No usable source means an
//! empty key set, which is still a valid document to publish.

use seatrace_logger::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    base64url::decode_any_base64,
    error::{JwksError, JwksResult},
    jwk::{CRV_ED25519, KTY_OKP},
    jwks_ensure,
    signing_key::SigningKey,
};

pub const SEATRACE_JWKS_JSON: &str = "SEATRACE_JWKS_JSON";
pub const SEATRACE_VERIFY_KEYS: &str = "SEATRACE_VERIFY_KEYS";
pub const SEATRACE_VERIFY_KEY: &str = "SEATRACE_VERIFY_KEY";

const ED25519_PUBLIC_KEY_LENGTH: usize = 32;

/// Snapshot of the configured key material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySources {
    pub jwks_json: Option<String>,
    pub verify_keys: Option<String>,
    pub verify_key: Option<String>,
}

impl KeySources {
    /// The configured sources in priority order. Unset and blank values are
    /// left out.
    #[must_use]
    pub fn strategies(&self) -> Vec<KeySource<'_>> {
        let mut sources = Vec::with_capacity(3);
        if let Some(json) = configured(&self.jwks_json) {
            sources.push(KeySource::JwksJson(json));
        }
        if let Some(list) = configured(&self.verify_keys) {
            sources.push(KeySource::KeyList(list));
        }
        if let Some(single) = configured(&self.verify_key) {
            sources.push(KeySource::SingleKey(single));
        }
        sources
    }
}

fn configured(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// One configuration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource<'a> {
    JwksJson(&'a str),
    KeyList(&'a str),
    SingleKey(&'a str),
}

impl KeySource<'_> {
    /// Environment variable backing this source.
    #[must_use]
    pub const fn variable(&self) -> &'static str {
        match self {
            Self::JwksJson(_) => SEATRACE_JWKS_JSON,
            Self::KeyList(_) => SEATRACE_VERIFY_KEYS,
            Self::SingleKey(_) => SEATRACE_VERIFY_KEY,
        }
    }

    /// Parse this source.
    ///
    /// # Errors
    ///
    /// Invalid JSON or invalid base64 anywhere in the source.
    pub fn load(&self) -> JwksResult<Vec<SigningKey>> {
        match self {
            Self::JwksJson(json) => keys_from_jwks_json(json),
            Self::KeyList(list) => keys_from_list(list),
            Self::SingleKey(value) => Ok(vec![SigningKey::with_derived_kid(decode_key(value)?)]),
        }
    }
}

/// Load the Ed25519 keys from the first configured source that yields any.
#[must_use]
pub fn load_signing_keys(sources: &KeySources) -> Vec<SigningKey> {
    for source in sources.strategies() {
        match source.load() {
            Ok(keys) if !keys.is_empty() => {
                debug!("loaded {} key(s) from {}", keys.len(), source.variable());
                return keys;
            }
            Ok(_) => debug!("no Ed25519 key found in {}", source.variable()),
            Err(e) => warn!("[jwks] failed to parse {}: {e}", source.variable()),
        }
    }
    vec![]
}

#[derive(Deserialize)]
struct RawKeySet {
    #[serde(default)]
    keys: Vec<Value>,
}

fn keys_from_jwks_json(json: &str) -> JwksResult<Vec<SigningKey>> {
    let key_set: RawKeySet = serde_json::from_str(json)?;
    let mut keys = Vec::new();
    for entry in &key_set.keys {
        let member = |name: &str| entry.get(name).and_then(Value::as_str);
        if member("kty") != Some(KTY_OKP) || member("crv") != Some(CRV_ED25519) {
            continue;
        }
        let Some(x) = member("x").filter(|x| !x.is_empty()) else {
            continue;
        };
        let raw = decode_key(x)?;
        keys.push(match member("kid").filter(|kid| !kid.is_empty()) {
            Some(kid) => SigningKey::new(kid.to_owned(), raw),
            None => SigningKey::with_derived_kid(raw),
        });
    }
    Ok(keys)
}

fn keys_from_list(list: &str) -> JwksResult<Vec<SigningKey>> {
    let mut keys = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        // `kid:value`; segments after a second ':' are ignored
        let mut segments = entry.split(':');
        let head = segments.next().unwrap_or_default();
        let key = match segments.next() {
            Some(value) => {
                let raw = decode_key(value)?;
                let kid = head.trim();
                if kid.is_empty() {
                    SigningKey::with_derived_kid(raw)
                } else {
                    SigningKey::new(kid.to_owned(), raw)
                }
            }
            None => SigningKey::with_derived_kid(decode_key(head)?),
        };
        keys.push(key);
    }
    Ok(keys)
}

fn decode_key(value: &str) -> JwksResult<Vec<u8>> {
    let raw = decode_any_base64(value)?;
    jwks_ensure!(
        !raw.is_empty(),
        JwksError::InvalidKeyMaterial("empty key value".to_owned())
    );
    if raw.len() != ED25519_PUBLIC_KEY_LENGTH {
        warn!(
            "[jwks] Ed25519 public keys are {ED25519_PUBLIC_KEY_LENGTH} bytes long, got {}",
            raw.len()
        );
    }
    Ok(raw)
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::{KeySource, KeySources, load_signing_keys};
    use crate::{base64url::encode_base64url, kid::derive_kid};

    fn key_b64(byte: u8) -> String {
        encode_base64url(&[byte; 32])
    }

    #[test]
    fn jwks_json_source_wins() {
        let json = format!(
            r#"{{"keys":[
                {{"kty":"OKP","crv":"Ed25519","x":"{}","kid":"main"}},
                {{"kty":"RSA","n":"AQAB","e":"AQAB","kid":"rsa"}},
                {{"kty":"OKP","crv":"X25519","x":"{}","kid":"ecdh"}},
                {{"kty":"OKP","crv":"Ed25519","x":"{}"}}
            ]}}"#,
            key_b64(1),
            key_b64(2),
            key_b64(3)
        );
        let sources = KeySources {
            jwks_json: Some(json),
            verify_keys: Some(format!("list:{}", key_b64(4))),
            verify_key: Some(key_b64(5)),
        };
        let keys = load_signing_keys(&sources);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].kid, "main");
        assert_eq!(keys[0].raw, vec![1; 32]);
        assert_eq!(keys[1].kid, derive_kid(&[3; 32]));
        assert_eq!(keys[1].raw, vec![3; 32]);
    }

    #[test]
    fn invalid_json_falls_through_to_the_list() {
        let sources = KeySources {
            jwks_json: Some("{not json".to_owned()),
            verify_keys: Some(format!(" a:{} , {} ,,", key_b64(1), key_b64(2))),
            verify_key: Some(key_b64(3)),
        };
        let keys = load_signing_keys(&sources);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].kid, "a");
        assert_eq!(keys[0].raw, vec![1; 32]);
        assert_eq!(keys[1].kid, derive_kid(&[2; 32]));
    }

    #[test]
    fn json_without_ed25519_keys_falls_through() {
        let sources = KeySources {
            jwks_json: Some(r#"{"keys":[{"kty":"RSA","n":"AQAB","e":"AQAB"}]}"#.to_owned()),
            verify_keys: None,
            verify_key: Some(key_b64(7)),
        };
        let keys = load_signing_keys(&sources);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].raw, vec![7; 32]);
    }

    #[test]
    fn invalid_base64_in_list_skips_the_whole_list() {
        let sources = KeySources {
            jwks_json: None,
            verify_keys: Some(format!("good:{},bad:***", key_b64(1))),
            verify_key: Some(key_b64(9)),
        };
        let keys = load_signing_keys(&sources);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].raw, vec![9; 32]);
    }

    #[test]
    fn list_entry_trailing_segments_are_dropped() {
        let keys = KeySource::KeyList(&format!("main:{}:junk, {}", key_b64(6), key_b64(8)))
            .load()
            .unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].kid, "main");
        assert_eq!(keys[0].raw, vec![6; 32]);
        assert_eq!(keys[1].raw, vec![8; 32]);
    }

    #[test]
    fn list_entry_with_empty_kid_gets_a_derived_kid() {
        let keys = KeySource::KeyList(&format!(":{}", key_b64(4))).load().unwrap();
        assert_eq!(keys[0].kid, derive_kid(&[4; 32]));
    }

    #[test]
    fn single_key_accepts_standard_base64_with_whitespace() {
        // 0xfb bytes encode to '+' and '/' in the standard alphabet
        let raw = vec![0xfb; 32];
        let standard = "+/v7+/v7+/v7+/v7+/v7+/v7+/v7+/v7+/v7+/v7+/s=";
        let sources = KeySources {
            verify_key: Some(format!("  {}\n{}  ", &standard[..20], &standard[20..])),
            ..Default::default()
        };
        let keys = load_signing_keys(&sources);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].raw, raw);
        assert_eq!(keys[0].kid, derive_kid(&raw));
    }

    #[test]
    fn nothing_configured_yields_no_keys() {
        assert!(load_signing_keys(&KeySources::default()).is_empty());
        let blank = KeySources {
            jwks_json: Some("   ".to_owned()),
            verify_keys: Some(String::new()),
            verify_key: None,
        };
        assert!(blank.strategies().is_empty());
        assert!(load_signing_keys(&blank).is_empty());
    }

    #[test]
    fn all_sources_broken_yields_no_keys() {
        let sources = KeySources {
            jwks_json: Some("[]".to_owned()),
            verify_keys: Some("kid:%%%".to_owned()),
            verify_key: Some("@@@".to_owned()),
        };
        assert!(load_signing_keys(&sources).is_empty());
    }

    #[test]
    fn strategies_keep_priority_order() {
        let sources = KeySources {
            jwks_json: Some("{}".to_owned()),
            verify_keys: Some("a".to_owned()),
            verify_key: Some("b".to_owned()),
        };
        let variables: Vec<_> = sources
            .strategies()
            .iter()
            .map(|source| source.variable())
            .collect();
        assert_eq!(
            variables,
            vec!["SEATRACE_JWKS_JSON", "SEATRACE_VERIFY_KEYS", "SEATRACE_VERIFY_KEY"]
        );
    }
}
