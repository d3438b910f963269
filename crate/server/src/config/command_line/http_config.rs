use std::fmt::Display;

use clap::Args;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOSTNAME: &str = "0.0.0.0";

#[derive(Args, Clone)]
pub struct HttpConfig {
    /// The JWKS server port
    #[clap(long, env = "SEATRACE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// The JWKS server hostname
    #[clap(long, env = "SEATRACE_HOSTNAME", default_value = DEFAULT_HOSTNAME)]
    pub hostname: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            hostname: DEFAULT_HOSTNAME.to_owned(),
        }
    }
}

impl Display for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "http://{}:{}", self.hostname, self.port)
    }
}

impl std::fmt::Debug for HttpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", &self))
    }
}
