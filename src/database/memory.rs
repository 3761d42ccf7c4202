//! In-process account storage for tests and local development

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{today_utc, AccountStore, Result};
use crate::models::{dto::AccountPayload, Account};

#[derive(Default)]
pub struct MemoryDatabase {
    data: RwLock<MemoryStore>,
}

#[derive(Default)]
struct MemoryStore {
    accounts: BTreeMap<i32, Account>,
    /// Last id handed out. Never decremented, so deleted ids are not reused.
    last_id: i32,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryDatabase {
    async fn create_account(&self, payload: &AccountPayload) -> Result<Account> {
        let mut store = self.data.write().await;
        store.last_id += 1;
        let account = Account {
            id: store.last_id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            address: payload.address.clone(),
            phone_number: payload.phone_number.clone(),
            date_joined: today_utc(),
        };
        store.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let store = self.data.read().await;
        Ok(store.accounts.values().cloned().collect())
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>> {
        let store = self.data.read().await;
        Ok(store.accounts.get(&id).cloned())
    }

    async fn update_account(&self, account: &Account) -> Result<Option<Account>> {
        let mut store = self.data.write().await;
        let Some(existing) = store.accounts.get_mut(&account.id) else {
            return Ok(None);
        };
        existing.name = account.name.clone();
        existing.email = account.email.clone();
        existing.address = account.address.clone();
        existing.phone_number = account.phone_number.clone();
        Ok(Some(existing.clone()))
    }

    async fn delete_account(&self, id: i32) -> Result<()> {
        self.data.write().await.accounts.remove(&id);
        Ok(())
    }
}
