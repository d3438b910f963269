//! The `/.well-known/jwks.json` endpoint.

use std::{convert::Infallible, sync::Arc};

use actix_web::{
    HttpRequest, HttpResponse, Resource,
    http::{Method, header},
    web::{self, Bytes, Data},
};
use futures::stream;
use seatrace_logger::{debug, trace};

use crate::{core::JwksCache, result::SResult};

pub const JWKS_PATH: &str = "/.well-known/jwks.json";
pub const JWKS_CONTENT_TYPE: &str = "application/jwk-set+json; charset=utf-8";
pub const JWKS_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=60";
pub const JWKS_ALLOWED_METHODS: &str = "GET, HEAD";

/// All methods are routed to [`serve_jwks`], which answers 405 itself.
pub(crate) fn jwks_resource() -> Resource {
    web::resource(JWKS_PATH).to(serve_jwks)
}

pub(crate) async fn serve_jwks(
    req: HttpRequest,
    cache: Data<Arc<JwksCache>>,
) -> SResult<HttpResponse> {
    let method = req.method();
    if method != Method::GET && method != Method::HEAD {
        debug!("{method} {JWKS_PATH}: method not allowed");
        return Ok(HttpResponse::MethodNotAllowed()
            .insert_header((header::ALLOW, JWKS_ALLOWED_METHODS))
            .finish());
    }

    let generation = cache.current()?;

    let not_modified = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .is_some_and(|value| value.as_bytes() == generation.etag.as_bytes());
    if not_modified {
        trace!("{method} {JWKS_PATH}: 304 {}", generation.etag);
        return Ok(HttpResponse::NotModified()
            .insert_header((header::ETAG, generation.etag.as_str()))
            .insert_header((header::CACHE_CONTROL, JWKS_CACHE_CONTROL))
            .finish());
    }

    trace!("{method} {JWKS_PATH}: 200 {}", generation.etag);
    let mut response = HttpResponse::Ok();
    response
        .insert_header((header::CONTENT_TYPE, JWKS_CONTENT_TYPE))
        .insert_header((header::CACHE_CONTROL, JWKS_CACHE_CONTROL))
        .insert_header((header::ETAG, generation.etag.as_str()))
        .insert_header((header::LAST_MODIFIED, generation.last_modified.as_str()));
    if method == Method::HEAD {
        // advertise the GET body length without sending it
        let length = u64::try_from(generation.body.len())
            .map_err(|e| crate::server_error!("body length: {e}"))?;
        Ok(response
            .no_chunking(length)
            .streaming(stream::empty::<Result<Bytes, Infallible>>()))
    } else {
        Ok(response.body(generation.body.clone()))
    }
}
