//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Clones share the underlying maps, so one instance can back several
/// managers over the same ledger state.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    accounts: Arc<RwLock<HashMap<Address, Account>>>,
    total_supply: Arc<RwLock<TokenAmount>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            total_supply: Arc::new(RwLock::new(0)),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        *self.total_supply.write().unwrap() = 0;
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStorage for MemoryStorage {
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.address.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, address: &Address) -> LedgerResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(address).cloned())
    }

    async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        Ok(self.accounts.read().unwrap().values().cloned().collect())
    }

    async fn get_total_supply(&self) -> LedgerResult<TokenAmount> {
        Ok(*self.total_supply.read().unwrap())
    }

    async fn set_total_supply(&mut self, supply: TokenAmount) -> LedgerResult<()> {
        *self.total_supply.write().unwrap() = supply;
        Ok(())
    }
}
