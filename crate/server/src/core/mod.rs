pub mod clock;
pub mod jwks_cache;

pub use clock::{Clock, SystemClock};
pub use jwks_cache::{CachedJwks, JwksCache};
