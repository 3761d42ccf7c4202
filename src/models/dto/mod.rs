pub mod account;
pub mod message;
pub mod service;
pub use account::*;
pub use message::Message;
pub use service::*;

use utoipa::OpenApi;

use crate::models::Account;

#[derive(OpenApi)]
#[openapi(components(schemas(
    Account,
    AccountPayload,
    Message,
    HealthStatus,
    ServiceInfo,
)))]
/// Captures OpenAPI schemas defined in the DTO module
pub struct OpenApiSchemas;
