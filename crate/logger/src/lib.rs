//! Logging setup for the SeaTrace JWKS server and tools.
//!
//! The tracing macros are re-exported so that member crates only need to
//! depend on this crate to log.

mod log_utils;

pub use log_utils::log_init;
pub use tracing::{debug, error, info, trace, warn};
