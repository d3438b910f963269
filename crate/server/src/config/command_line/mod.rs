mod clap_config;
mod http_config;
mod keys_config;
mod logging;

pub use clap_config::ClapConfig;
pub use http_config::{DEFAULT_HOSTNAME, DEFAULT_PORT, HttpConfig};
pub use keys_config::KeysConfig;
pub use logging::LoggingConfig;
