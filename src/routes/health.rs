use crate::models::dto::{HealthStatus, ServiceInfo};
use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;
#[derive(OpenApi)]
#[openapi(paths(health_checker_handler, index_handler))]
/// Defines the OpenAPI spec for service endpoints
pub struct HealthApi;

/// Used to group service endpoints together in the OpenAPI documentation
pub const HEALTH_API_GROUP: &str = "HEALTH";

#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_API_GROUP,
    responses(
        (status = OK, description = "Service is alive", body = HealthStatus)
    )
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(HealthStatus::ok())
}

#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_API_GROUP,
    responses(
        (status = OK, description = "Service name and version", body = ServiceInfo)
    )
)]
pub async fn index_handler() -> impl IntoResponse {
    Json(ServiceInfo::default())
}
