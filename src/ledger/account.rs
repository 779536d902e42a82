//! Account read-side functionality

use crate::traits::*;
use crate::types::*;

/// Account manager answering the read-only ledger queries
///
/// Every answer is computed from a snapshot copy of the stored record, so
/// callers can never mutate ledger internals through a query result.
pub struct AccountManager<S: TokenStorage> {
    pub(crate) storage: S,
    validator: Box<dyn AddressValidator>,
}

impl<S: TokenStorage> AccountManager<S> {
    /// Create a new account manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultAddressValidator),
        }
    }

    /// Create a new account manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn AddressValidator>) -> Self {
        Self { storage, validator }
    }

    /// Get a snapshot of an account record
    pub async fn get_account(&self, address: &Address) -> LedgerResult<Option<Account>> {
        self.validator.validate_address(address)?;
        self.storage.get_account(address).await
    }

    /// Balance held by `owner`
    ///
    /// An address that never appeared in the ledger holds zero; this query
    /// does not distinguish it from a stored zero-balance record.
    pub async fn balance(&self, owner: &Address) -> LedgerResult<TokenAmount> {
        Ok(self
            .get_account(owner)
            .await?
            .map(|account| account.balance)
            .unwrap_or(0))
    }

    /// Remaining approved amount for `spender` out of `owner`'s balance
    ///
    /// Fails with `NoAllowance` when no entry was ever stored for the pair,
    /// including when `owner` itself is unknown. An approval of zero is a
    /// stored entry and is reported as `Ok(0)`.
    pub async fn allowance(
        &self,
        owner: &Address,
        spender: &Address,
    ) -> LedgerResult<TokenAmount> {
        self.validator.validate_address(spender)?;
        let account = self
            .get_account(owner)
            .await?
            .ok_or(LedgerError::NoAllowance)?;
        account.allowance(spender).ok_or(LedgerError::NoAllowance)
    }

    /// List snapshots of all account records
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts().await
    }
}
