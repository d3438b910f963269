use actix_web::{
    HttpResponse, HttpResponseBuilder, get,
    http::{StatusCode, header},
    web::Json,
};
use clap::crate_version;
use seatrace_logger::{error, info, warn};

use crate::{error::ServerError, result::SResult};

pub mod health;
pub mod jwks;

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ConversionError(_)
            | Self::ConfigurationError(_)
            | Self::Jwks(_)
            | Self::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = self.to_string();

        if status_code >= StatusCode::INTERNAL_SERVER_ERROR {
            error!("{status_code} - {message}");
        } else {
            warn!("{status_code} - {message}");
        }

        HttpResponseBuilder::new(status_code)
            .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(message)
    }
}

/// Get the server version
#[get("/version")]
pub(crate) async fn get_version() -> SResult<Json<String>> {
    info!("GET /version");
    Ok(Json(format!(
        "{} ({})",
        crate_version!(),
        openssl::version::version()
    )))
}
