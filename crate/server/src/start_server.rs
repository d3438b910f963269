use std::sync::Arc;

use actix_web::{App, HttpServer, dev::ServerHandle, web::Data};
use seatrace_logger::info;

use crate::{
    config::ServerParams,
    core::{Clock, JwksCache, SystemClock},
    result::SResult,
    routes::{self, jwks::JWKS_PATH},
    server_error,
};

/// Start the JWKS publisher and block until it stops.
///
/// If `server_handle_transmitter` is given, the handle of the running
/// server is sent through it so that callers can stop it.
pub async fn start_server(
    server_params: ServerParams,
    server_handle_transmitter: Option<std::sync::mpsc::Sender<ServerHandle>>,
) -> SResult<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = Arc::new(JwksCache::new(server_params.key_sources.clone(), clock));

    // Build the first generation so that configuration problems show at startup
    let generation = cache.current()?;
    info!(
        "Publishing {} key(s) at {JWKS_PATH}, ETag {}",
        generation.key_count, generation.etag
    );

    let address = server_params.bind_address()?;
    info!("Starting the HTTP JWKS server on http://{address}");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(cache.clone()))
            .service(routes::jwks::jwks_resource())
            .service(routes::health::get_health)
            .service(routes::get_version)
    })
    .bind(address)?
    .run();

    if let Some(transmitter) = server_handle_transmitter {
        transmitter
            .send(server.handle())
            .map_err(|e| server_error!("failed to send the server handle: {e}"))?;
    }

    server.await?;
    Ok(())
}
