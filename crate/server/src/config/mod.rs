mod command_line;
mod params;

pub use command_line::{
    ClapConfig, DEFAULT_HOSTNAME, DEFAULT_PORT, HttpConfig, KeysConfig, LoggingConfig,
};
pub use params::ServerParams;
