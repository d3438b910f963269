use std::{
    fmt,
    net::{SocketAddr, ToSocketAddrs},
};

use seatrace_jwks::KeySources;

use crate::{
    config::ClapConfig,
    error::ServerError,
    result::{SResult, SResultHelper},
    server_ensure,
};

/// This structure is the context used by the server
/// while it is running. There is a singleton instance
/// shared between all threads.
pub struct ServerParams {
    pub hostname: String,

    pub port: u16,

    /// Snapshot of the configured key material, taken at startup
    pub key_sources: KeySources,

    /// The log filter given on the command line, if any
    pub rust_log: Option<String>,
}

impl ServerParams {
    /// The socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Fails when `hostname:port` does not resolve to an address.
    pub fn bind_address(&self) -> SResult<SocketAddr> {
        format!("{}:{}", self.hostname, self.port)
            .to_socket_addrs()
            .with_context(|| format!("cannot resolve {}:{}", self.hostname, self.port))?
            .next()
            .with_context(|| format!("no address for {}:{}", self.hostname, self.port))
    }
}

impl TryFrom<ClapConfig> for ServerParams {
    type Error = ServerError;

    fn try_from(conf: ClapConfig) -> SResult<Self> {
        server_ensure!(
            !conf.http.hostname.trim().is_empty(),
            ServerError::ConfigurationError("the hostname cannot be empty".to_owned())
        );
        Ok(Self {
            key_sources: KeySources::from(&conf.keys),
            hostname: conf.http.hostname,
            port: conf.http.port,
            rust_log: conf.logging.rust_log,
        })
    }
}

impl fmt::Debug for ServerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<&str> = self
            .key_sources
            .strategies()
            .iter()
            .map(|source| source.variable())
            .collect();
        f.debug_struct("")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("key sources", &sources)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}
