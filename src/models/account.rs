use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted customer record
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, sqlx::FromRow, ToSchema)]
pub struct Account {
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@example.com")]
    pub email: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    #[schema(value_type = String, example = "2024-01-31")]
    pub date_joined: NaiveDate,
}

impl Account {
    /// Replaces every client-mutable field, leaving `id` and `date_joined` alone
    pub fn apply(&mut self, payload: super::dto::AccountPayload) {
        self.name = payload.name;
        self.email = payload.email;
        self.address = payload.address;
        self.phone_number = payload.phone_number;
    }
}
