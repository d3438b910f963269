use clap::Parser;
use dotenvy::dotenv;
use seatrace_jwks_server::{
    config::{ClapConfig, ServerParams},
    result::SResult,
    start_server::start_server,
};
use seatrace_logger::{debug, info, log_init};
use tracing::span;

/// Filter used when neither `RUST_LOG` nor `--rust-log` is set
const DEFAULT_LOG_FILTER: &str = "info,seatrace=info,actix_web=info";

/// The main entrypoint of the program.
///
/// This function sets up the necessary environment variables and logging options,
/// then parses the command line arguments using [`ClapConfig::parse()`].
#[tokio::main]
async fn main() -> SResult<()> {
    // Load variable from a .env file
    dotenv().ok();

    // Set up environment variables and logging options
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
        }
    }

    let clap_config = ClapConfig::parse();

    if let Some(rust_log) = &clap_config.logging.rust_log {
        unsafe {
            std::env::set_var("RUST_LOG", rust_log);
        }
    }
    log_init(None);

    let span = span!(tracing::Level::INFO, "start");
    let _guard = span.enter();

    info!(
        "OpenSSL version: {}, in {}, number: {:x}",
        openssl::version::version(),
        openssl::version::dir(),
        openssl::version::number()
    );

    // Instantiate a config object using the env variables and the args of the binary
    debug!("Command line config: {clap_config:#?}");

    let info_only = clap_config.info;

    // Parse the Server Config from the command line arguments
    let server_params = ServerParams::try_from(clap_config)?;

    if info_only {
        info!("Server configuration: {server_params:#?}");
        info!("Server started with --info. Exiting");
        return Ok(());
    }

    Box::pin(start_server(server_params, None)).await
}
