mod account;
mod health;
mod middlewares;
mod swagger;
mod utils;
use health::{health_checker_handler, index_handler};
use middlewares::{header_layer, https_guard, security_headers, HSTS_VALUE};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::AppState;

use axum::{http::header, middleware, routing::get, Router};
use std::sync::Arc;

/// Builds the full service router around an already connected [`AppState`]
pub fn make_app(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_handler).fallback(utils::method_not_allowed_handler))
        .route(
            "/health",
            get(health_checker_handler).fallback(utils::method_not_allowed_handler),
        )
        .nest("/accounts", account::account_routes())
        .merge(swagger::build_documentation())
        .fallback(utils::not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), https_guard));

    for layer in security_headers() {
        app = app.layer(layer);
    }
    if state.config.https_enforced() {
        info!("HTTPS enforcement enabled");
        app = app.layer(header_layer(header::STRICT_TRANSPORT_SECURITY, HSTS_VALUE));
    }
    if state.config.cors_enabled {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, database::MemoryDatabase};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(config: Config) -> Router {
        make_app(Arc::new(AppState {
            db: Arc::new(MemoryDatabase::new()),
            config,
        }))
    }

    fn testing_app() -> Router {
        app_with(Config {
            testing: true,
            ..Default::default()
        })
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::HOST, "accounts.example.com")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = testing_app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "OK"}));
    }

    #[tokio::test]
    async fn test_index() {
        let response = testing_app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"name": "Account REST API Service", "version": "1.0"})
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = testing_app()
            .oneshot(get_request("/no/such/thing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error = body_json(response).await;
        assert_eq!(error["status"], 404);
        assert_eq!(error["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = testing_app().oneshot(get_request("/")).await.unwrap();
        let headers = response.headers();
        assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "SAMEORIGIN");
        assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
        assert!(headers.get(header::CONTENT_SECURITY_POLICY).is_some());
        assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .header(header::ORIGIN, "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let response = testing_app().oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_insecure_request_redirected_when_https_enforced() {
        let app = app_with(Config::default());
        let response = app.oneshot(get_request("/accounts?x=1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://accounts.example.com/accounts?x=1"
        );
        assert_eq!(
            response
                .headers()
                .get(header::STRICT_TRANSPORT_SECURITY)
                .unwrap(),
            HSTS_VALUE
        );
    }

    #[tokio::test]
    async fn test_forwarded_https_and_health_pass_through() {
        let app = app_with(Config::default());

        let request = Request::builder()
            .method("GET")
            .uri("/accounts")
            .header(header::HOST, "accounts.example.com")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_method_on_service_route_is_json_405() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = testing_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let error = body_json(response).await;
        assert_eq!(error["status"], 405);
        assert_eq!(error["error"], "Method Not Allowed");
    }
}
