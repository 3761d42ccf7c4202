use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use utoipa::OpenApi;

use crate::{
    models::{
        dto::AccountPayload,
        Account, Error,
    },
    AppState,
};

use super::utils::{check_content_type, method_not_allowed_handler, AccountId, JSON_MEDIA_TYPE};

/// Defines the OpenAPI spec for account endpoints
#[derive(OpenApi)]
#[openapi(paths(
    create_account_handler,
    list_accounts_handler,
    get_account_handler,
    update_account_handler,
    delete_account_handler
))]
pub struct AccountsApi;

/// Used to group account endpoints together in the OpenAPI documentation
pub const ACCOUNT_API_GROUP: &str = "ACCOUNT";

/// Builds a router for account routes
pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            post(create_account_handler)
                .get(list_accounts_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/:id",
            get(get_account_handler)
                .put(update_account_handler)
                .delete(delete_account_handler)
                .fallback(method_not_allowed_handler),
        )
}

/// URL at which a single account can be read
pub fn account_location(id: i32) -> String {
    format!("/accounts/{id}")
}

/// Create account handler function
#[utoipa::path(
    post,
    path = "/accounts",
    tag = ACCOUNT_API_GROUP,
    request_body(content = AccountPayload, content_type = "application/json"),
    responses(
        (status = 201, description = "Account successfully created", body = Account,
            headers(("Location" = String, description = "URL of the new account"))),
        (status = 400, description = "Missing or malformed account data", body = Message),
        (status = 415, description = "Content-Type is not application/json", body = Message),
    )
)]
pub async fn create_account_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    info!("Request to create an Account");
    check_content_type(&headers, JSON_MEDIA_TYPE)?;
    let payload = AccountPayload::from_json(&body)?;

    let account = state.db.create_account(&payload).await?;
    info!("Account with id {} created", account.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, account_location(account.id))],
        Json(account),
    ))
}

/// List accounts handler function
#[utoipa::path(
    get,
    path = "/accounts",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "All accounts", body = [Account]),
    )
)]
pub async fn list_accounts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, Error> {
    info!("Request to list Accounts");
    let accounts = state.db.list_accounts().await?;
    info!("Returning {} accounts", accounts.len());
    Ok(Json(accounts))
}

/// Get account handler function
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 200, description = "Account found", body = Account),
        (status = 404, description = "Account not found", body = Message),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn get_account_handler(
    State(state): State<Arc<AppState>>,
    AccountId(id): AccountId,
) -> Result<Json<Account>, Error> {
    info!("Request to read account with id: {}", id);
    let account = state.db.get_account_by_id(id).await?;
    let account = account.ok_or_else(|| {
        Error::not_found(&format!("Account with id '{id}' was not found."))
    })?;
    Ok(Json(account))
}

/// Update account handler function
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    tag = ACCOUNT_API_GROUP,
    request_body(content = AccountPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Account successfully updated", body = Account),
        (status = 400, description = "Missing or malformed account data", body = Message),
        (status = 404, description = "Account not found", body = Message),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn update_account_handler(
    State(state): State<Arc<AppState>>,
    AccountId(id): AccountId,
    body: Bytes,
) -> Result<Json<Account>, Error> {
    info!("Request to update an Account with id: {}", id);
    let not_found = || Error::not_found(&format!("Account with id [{id}] could not be found."));

    let mut account = state.db.get_account_by_id(id).await?.ok_or_else(not_found)?;
    account.apply(AccountPayload::from_json(&body)?);

    // Row may have been deleted since the lookup
    let updated = state.db.update_account(&account).await?.ok_or_else(not_found)?;
    Ok(Json(updated))
}

/// Delete account handler function
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    tag = ACCOUNT_API_GROUP,
    responses(
        (status = 204, description = "Account deleted, or it never existed"),
    ),
    params(
        ("id" = i32, Path, description = "Account ID")
    )
)]
pub async fn delete_account_handler(
    State(state): State<Arc<AppState>>,
    AccountId(id): AccountId,
) -> Result<StatusCode, Error> {
    info!("Request to delete an Account with id: {}", id);
    state.db.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
