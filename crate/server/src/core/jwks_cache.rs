//! In-memory cache of the published key set.
//!
//! A generation holds the serialized document together with its validators
//! (`ETag`, `Last-Modified`). It is rebuilt wholesale from the key material
//! snapshot when the cache is empty or the generation has expired.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use seatrace_jwks::{JwksDocument, KeySources, SigningKey, load_signing_keys};
use seatrace_logger::{debug, info};

use crate::{core::clock::Clock, error::ServerError, result::SResult};

/// Lifetime of a cache generation, in seconds.
pub const JWKS_TTL_SECONDS: i64 = 300;

/// Number of hexadecimal digits of the body digest kept in the `ETag`.
pub const ETAG_HEX_LENGTH: usize = 20;

/// IMF-fixdate, the preferred HTTP date format.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// One cache generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedJwks {
    pub body: String,
    pub etag: String,
    pub last_modified: String,
    pub built_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub key_count: usize,
}

impl CachedJwks {
    fn build(document: &JwksDocument, now: DateTime<Utc>, ttl: Duration) -> SResult<Self> {
        let body = document.to_pretty_json()?;
        Ok(Self {
            etag: etag_for(&body),
            last_modified: http_date(now),
            built_at: now,
            expires_at: now + ttl,
            key_count: document.keys.len(),
            body,
        })
    }

    /// A generation is served until the clock passes its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Strong `ETag` of a body: the truncated hex SHA-256, quoted.
#[must_use]
pub fn etag_for(body: &str) -> String {
    let digest = hex::encode(openssl::sha::sha256(body.as_bytes()));
    format!("\"{}\"", &digest[..ETAG_HEX_LENGTH])
}

/// Format an instant as an HTTP date.
#[must_use]
pub fn http_date(instant: DateTime<Utc>) -> String {
    instant.format(HTTP_DATE_FORMAT).to_string()
}

/// The publisher cache, shared by all the workers.
#[derive(Debug)]
pub struct JwksCache {
    sources: KeySources,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    current: RwLock<Option<Arc<CachedJwks>>>,
}

impl JwksCache {
    #[must_use]
    pub fn new(sources: KeySources, clock: Arc<dyn Clock>) -> Self {
        Self {
            sources,
            clock,
            ttl: Duration::seconds(JWKS_TTL_SECONDS),
            current: RwLock::new(None),
        }
    }

    /// The generation to serve now, rebuilding it first when needed.
    ///
    /// # Errors
    ///
    /// Fails when a lock is poisoned or the document cannot be serialized.
    pub fn current(&self) -> SResult<Arc<CachedJwks>> {
        let now = self.clock.now();
        let cached = self
            .current
            .read()
            .map_err(|e| {
                ServerError::ServerError(format!("cannot lock JWKS cache for read. Error: {e:?}"))
            })?
            .clone();
        match cached {
            Some(generation) if !generation.is_expired(now) => Ok(generation),
            _ => self.rebuild(now),
        }
    }

    /// Build a new generation from the key material and swap it in.
    ///
    /// The build runs outside the lock; concurrent rebuilds produce the same
    /// document and the last one stored wins.
    fn rebuild(&self, now: DateTime<Utc>) -> SResult<Arc<CachedJwks>> {
        let keys = load_signing_keys(&self.sources);
        let document = JwksDocument::new(keys.iter().map(SigningKey::to_jwk).collect());
        let generation = Arc::new(CachedJwks::build(&document, now, self.ttl)?);
        debug!(
            "[jwks] built generation {} with {} key(s), expires at {}",
            generation.etag, generation.key_count, generation.expires_at
        );
        {
            let mut current = self.current.write().map_err(|e| {
                ServerError::ServerError(format!("cannot lock JWKS cache for write. Error: {e:?}"))
            })?;
            *current = Some(generation.clone());
        }
        info!("[jwks] refreshed: {} key(s)", generation.key_count);
        Ok(generation)
    }
}
