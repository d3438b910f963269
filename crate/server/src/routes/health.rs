use std::sync::Arc;

use actix_web::{
    get,
    web::{Data, Json},
};
use chrono::{SecondsFormat, Utc};
use seatrace_logger::{trace, warn};
use serde::Serialize;

use crate::{core::JwksCache, result::SResult};

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub jwks: JwksCheck,
}

#[derive(Debug, Serialize)]
pub struct JwksCheck {
    pub status: &'static str,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JwksCheck {
    fn run(cache: &JwksCache) -> Self {
        match cache.current() {
            Ok(generation) => Self {
                status: "healthy",
                healthy: true,
                keys: Some(generation.key_count),
                error: None,
            },
            Err(e) => {
                warn!("health check: JWKS cache unavailable: {e}");
                Self {
                    status: "error",
                    healthy: false,
                    keys: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Report the state of the publisher. Always answers 200.
#[get("/health")]
pub(crate) async fn get_health(cache: Data<Arc<JwksCache>>) -> SResult<Json<HealthReport>> {
    trace!("GET /health");
    let jwks = JwksCheck::run(&cache);
    Ok(Json(HealthReport {
        status: if jwks.healthy { "healthy" } else { "unhealthy" },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        checks: HealthChecks { jwks },
    }))
}
