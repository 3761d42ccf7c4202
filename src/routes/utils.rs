use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{header, request::Parts, HeaderMap, Method, StatusCode, Uri},
};
use tracing::error;

use crate::models::Error;

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Accepts the request only when its declared media type is exactly `media_type`
pub fn check_content_type(headers: &HeaderMap, media_type: &str) -> Result<(), Error> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    if content_type == Some(media_type) {
        return Ok(());
    }
    error!("Invalid Content-Type: {:?}", content_type);
    Err(Error::unsupported_media_type(&format!(
        "Content-Type must be {media_type}"
    )))
}

/// Account id taken from the `:id` path segment.
/// Segments that are not an `i32` cannot name an account, so they are a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for AccountId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| url_not_found(&parts.uri))?;
        raw.parse::<i32>()
            .map(AccountId)
            .map_err(|_| Error::not_found(&format!("Account with id '{raw}' was not found.")))
    }
}

/// Fallback for paths that match no route
pub async fn not_found_handler(uri: Uri) -> Error {
    url_not_found(&uri)
}

fn url_not_found(uri: &Uri) -> Error {
    Error::not_found(&format!("The requested URL {} was not found on the server.", uri.path()))
}

/// Fallback for a known path hit with a method it does not serve
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> Error {
    Error::new(
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("Method {} is not allowed for {}.", method, uri.path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn exact_media_type_is_accepted() {
        assert!(check_content_type(&headers_with("application/json"), JSON_MEDIA_TYPE).is_ok());
    }

    #[test]
    fn anything_else_is_unsupported() {
        for content_type in ["text/html", "application/json; charset=utf-8", "application/xml"] {
            let err = check_content_type(&headers_with(content_type), JSON_MEDIA_TYPE).unwrap_err();
            assert_eq!(err.code, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        }
        let err = check_content_type(&HeaderMap::new(), JSON_MEDIA_TYPE).unwrap_err();
        assert_eq!(err.body.message, "Content-Type must be application/json");
    }
}
