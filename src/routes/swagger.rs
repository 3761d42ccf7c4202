use crate::models::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Account REST API Service",
    version = "1.0",
    description = "Create, read, update, delete and list customer accounts",
))]
struct Api;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from other locations in the app, such as the [dto] package
/// and the route submodules
pub fn build_documentation() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs())
}

fn api_docs() -> utoipa::openapi::OpenApi {
    let mut api_docs = Api::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::health::HealthApi::openapi());
    api_docs.merge(super::account::AccountsApi::openapi());
    api_docs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_account_path() {
        let docs = api_docs();
        for path in ["/", "/health", "/accounts", "/accounts/{id}"] {
            assert!(docs.paths.paths.contains_key(path), "missing {path}");
        }
        let schemas = &docs.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("Account"));
        assert!(schemas.contains_key("AccountPayload"));
    }
}
