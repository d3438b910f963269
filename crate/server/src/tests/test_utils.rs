use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::{
    App,
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, call_service, read_body},
    web::Data,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use seatrace_jwks::KeySources;
use serde::de::DeserializeOwned;

use crate::{
    core::{Clock, JwksCache},
    result::SResult,
    routes, server_bail,
};

/// `"A" * 43` is the unpadded base64url encoding of 32 zero bytes.
pub(crate) fn zero_key() -> String {
    "A".repeat(43)
}

/// Kid derived from [`zero_key`]: the first 16 hex digits of its SHA-256.
pub(crate) const ZERO_KEY_KID: &str = "0f007385b6f9d4b7";

/// A clock that only moves when told to.
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(
                Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
                    .single()
                    .expect("valid instant"),
            ),
        }
    }
}

impl ManualClock {
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Creates a test application instance serving `sources` with the given clock.
pub(crate) async fn test_app(
    sources: KeySources,
    clock: Arc<ManualClock>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let cache = Arc::new(JwksCache::new(sources, clock));

    let app = App::new()
        .app_data(Data::new(cache))
        .service(routes::jwks::jwks_resource())
        .service(routes::health::get_health)
        .service(routes::get_version);

    test::init_service(app).await
}

pub(crate) async fn get_json_with_uri<B, R, S>(app: &S, uri: &str) -> SResult<R>
where
    R: DeserializeOwned,
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let res = call_service(app, req).await;
    if res.status() != StatusCode::OK {
        server_bail!(
            "{}",
            String::from_utf8(read_body(res).await.to_vec()).unwrap_or_else(|_| "[N/A".to_owned())
        );
    }
    let body = read_body(res).await;
    Ok(serde_json::from_slice(&body)?)
}
