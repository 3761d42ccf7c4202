mod memory;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::models::{dto::AccountPayload, Account, StoreError};
pub use memory::MemoryDatabase;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Connection string prefix that selects the in-memory backend
pub const MEMORY_URI: &str = "memory://";

const ACCOUNT_COLUMNS: &str = "id, name, email, address, phone_number, date_joined";

/// Persistence operations on Account rows. Every write is a single statement.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new row; the backend assigns `id` and `date_joined`
    async fn create_account(&self, payload: &AccountPayload) -> Result<Account>;
    /// All accounts in ascending id order
    async fn list_accounts(&self) -> Result<Vec<Account>>;
    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>>;
    /// Replaces the mutable fields of an existing row, `None` if the row is gone
    async fn update_account(&self, account: &Account) -> Result<Option<Account>>;
    /// Removes the row if present. Deleting a missing id is not an error.
    async fn delete_account(&self, id: i32) -> Result<()>;
}

/// Join date stamped on new accounts, always the UTC calendar day
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Opens the backend named by `db_url` and makes sure the account table exists
pub async fn connect(db_url: &str) -> Result<Arc<dyn AccountStore>> {
    if db_url.starts_with(MEMORY_URI) {
        info!("Using in-memory account storage");
        return Ok(Arc::new(MemoryDatabase::new()));
    }
    if !(db_url.starts_with("postgres://") || db_url.starts_with("postgresql://")) {
        let scheme = db_url.split("://").next().unwrap_or(db_url);
        return Err(StoreError::UnsupportedBackend(scheme.to_string()));
    }

    info!("Connecting to PostgreSQL...");
    let pool = connect_sqlx(db_url).await?;
    let db = PostgreDatabase::new(pool);
    db.init_schema().await?;
    info!("Connected to PostgreSQL!");
    Ok(Arc::new(db))
}

/// Connects to a PostgreSQL database with the given `db_url`, returning a connection pool for accessing it
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .max_connections(32)
        .min_connections(4)
        .connect(db_url)
        .await?;
    Ok(pool)
}

/// `date_joined` is bound from [`today_utc`] rather than left to the session time zone
fn insert_account_sql() -> String {
    format!(
        r#"
        INSERT INTO account (name, email, address, phone_number, date_joined)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ACCOUNT_COLUMNS}
        "#
    )
}

pub struct PostgreDatabase {
    sqlx_db: PgPool,
}

impl PostgreDatabase {
    pub fn new(sqlx_db: PgPool) -> Self {
        PostgreDatabase { sqlx_db }
    }

    /// Creates the account table if it is missing
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS account (
                id           SERIAL PRIMARY KEY,
                name         VARCHAR(64)  NOT NULL,
                email        VARCHAR(64)  NOT NULL,
                address      VARCHAR(256),
                phone_number VARCHAR(32),
                date_joined  DATE NOT NULL DEFAULT ((now() AT TIME ZONE 'utc')::date)
            )
            "#,
        )
        .execute(&self.sqlx_db)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for PostgreDatabase {
    async fn create_account(&self, payload: &AccountPayload) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(&insert_account_sql())
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(&payload.address)
            .bind(&payload.phone_number)
            .bind(today_utc())
            .fetch_one(&self.sqlx_db)
            .await?;
        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id"
        ))
        .fetch_all(&self.sqlx_db)
        .await?;
        Ok(rows)
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    async fn update_account(&self, account: &Account) -> Result<Option<Account>> {
        let row = sqlx::query_as::<_, Account>(&format!(
            r#"
            UPDATE account
            SET name = $1,
                email = $2,
                address = $3,
                phone_number = $4
            WHERE id = $5
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    async fn delete_account(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_uri_selects_memory_backend() {
        let db = connect("memory://").await.unwrap();
        assert!(db.list_accounts().await.unwrap().is_empty());
    }

    #[test]
    fn insert_binds_join_date_explicitly() {
        let sql = insert_account_sql();
        assert!(sql.contains("phone_number, date_joined)"));
        assert!(sql.contains("$5"));
        assert_eq!(today_utc(), Utc::now().date_naive());
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let err = connect("mysql://localhost/db").await.err().unwrap();
        assert!(matches!(err, StoreError::UnsupportedBackend(ref s) if s == "mysql"));
    }
}
