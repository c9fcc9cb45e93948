//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! route matching, and dispatching.

use crate::api;
use crate::config::Config;
use crate::logger;
use crate::response;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Greeting served on the root route. Wire-compatible with the service this
/// one replaces; external probes key on the literal text.
const GREETING: &str = "Hello from Node.js on OpenShift!";

/// The routes this server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Health,
    Info,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    cfg: Arc<Config>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path();
    let is_head = *method == Method::HEAD;

    if cfg.logging.access_log {
        logger::log_request(method, uri, req.version());
    }

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method) {
        return Ok(resp);
    }

    // 2. Match path and dispatch
    let resp = match match_route(path) {
        Some(Route::Home) => response::build_text_response(GREETING, is_head),
        Some(Route::Health) => response::build_text_response("OK", is_head),
        Some(Route::Info) => api::build_info_response(&cfg, is_head),
        None => response::build_404_response(),
    };

    if cfg.logging.access_log {
        let size = resp.body().size_hint().exact().unwrap_or(0);
        logger::log_response(resp.status().as_u16(), size);
    }

    Ok(resp)
}

/// Match a request path against the static route table (exact match only)
pub fn match_route(path: &str) -> Option<Route> {
    match path {
        "/" => Some(Route::Home),
        "/health" => Some(Route::Health),
        "/api/info" => Some(Route::Info),
        _ => None,
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(response::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::build_405_response())
        }
    }
}
