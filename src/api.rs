// Info endpoint module
// Reports application metadata for platform dashboards and probes

use crate::config::Config;
use crate::response;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;

/// Application name reported by the info endpoint. Kept from the service this
/// one replaces; dashboards key on it.
pub const APP_NAME: &str = "nodejs-sample";

/// The crate version doubles as the reported application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed-shape metadata payload served by `GET /api/info`.
///
/// Field order is the wire order.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InfoPayload {
    pub app: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub hostname: String,
}

impl InfoPayload {
    /// Assemble the payload from configuration and the OS hostname.
    pub fn collect(cfg: &Config) -> Self {
        Self {
            app: APP_NAME,
            version: APP_VERSION,
            environment: cfg.app.environment.clone(),
            hostname: host_identifier(),
        }
    }
}

/// OS-reported hostname, or "unknown" when the lookup fails.
fn host_identifier() -> String {
    hostname::get().map_or_else(
        |_| String::from("unknown"),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Build the `GET /api/info` response.
pub fn build_info_response(cfg: &Config, is_head: bool) -> Response<Full<Bytes>> {
    response::build_json_response(&InfoPayload::collect(cfg), is_head)
}
