use std::fmt;

use clap::Parser;

use super::{HttpConfig, KeysConfig, LoggingConfig};

#[derive(Parser, Default, Clone)]
#[clap(version, about, long_about = None)]
pub struct ClapConfig {
    #[clap(flatten)]
    pub http: HttpConfig,

    #[clap(flatten)]
    pub keys: KeysConfig,

    #[clap(flatten)]
    pub logging: LoggingConfig,

    /// Print the server configuration information and exit
    #[clap(long, env = "SEATRACE_INFO", default_value = "false")]
    pub info: bool,
}

impl fmt::Debug for ClapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("")
            .field("JWKS http", &self.http)
            .field("keys", &self.keys)
            .field("logging", &self.logging)
            .field("info", &self.info)
            .finish()
    }
}
