use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::debug;

use crate::{models::Error, AppState};

/// Paths that stay reachable over plain http, so load balancer probes keep working
const HTTPS_EXEMPT_PATHS: &[&str] = &["/health"];

pub const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Redirects plain http requests to https when the service enforces it
pub async fn https_guard(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if !state.config.https_enforced()
        || HTTPS_EXEMPT_PATHS.iter().any(|path| *path == req.uri().path())
        || is_secure(&req)
    {
        return next.run(req).await;
    }

    match https_location(&req) {
        Some(location) => {
            debug!("Redirecting insecure request to {}", location);
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        None => Error::new(StatusCode::BAD_REQUEST, "Missing Host header").into_response(),
    }
}

fn is_secure(req: &Request) -> bool {
    if req.uri().scheme_str() == Some("https") {
        return true;
    }
    forwarded_proto(req.headers())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// First hop of `X-Forwarded-Proto`, as set by the closest proxy
fn forwarded_proto(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
}

fn https_location(req: &Request) -> Option<String> {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.to_string()))?;
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Some(format!("https://{host}{path}"))
}

/// Response headers added to every reply
pub fn security_headers() -> Vec<SetResponseHeaderLayer<HeaderValue>> {
    [
        (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::CONTENT_SECURITY_POLICY, "default-src 'self'"),
        (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
    ]
    .into_iter()
    .map(|(name, value)| header_layer(name, value))
    .collect()
}

pub fn header_layer(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}
