//! Main ledger orchestrator that coordinates accounts and operations

use serde::{Deserialize, Serialize};

use crate::ledger::{AccountManager, OperationManager};
use crate::traits::*;
use crate::types::*;

/// Token ledger engine exposing the contract's operation surface
///
/// Operations execute strictly one at a time: each mutating entrypoint
/// takes `&mut self`, so a hosting environment that needs concurrent
/// access wraps the whole ledger in one exclusive-access guard rather
/// than locking per account. Queries see only committed state.
pub struct TokenLedger<S: TokenStorage> {
    account_manager: AccountManager<S>,
    operation_manager: OperationManager<S>,
}

impl<S: TokenStorage + Clone> TokenLedger<S> {
    /// Create a ledger over the given storage backend with an empty
    /// account table and a total supply of zero
    pub fn new(storage: S) -> Self {
        Self {
            account_manager: AccountManager::new(storage.clone()),
            operation_manager: OperationManager::new(storage),
        }
    }

    /// Create a ledger with custom validators
    pub fn with_validators(
        storage: S,
        address_validator: Box<dyn AddressValidator>,
        operation_validator: Box<dyn OperationValidator>,
    ) -> Self {
        Self {
            account_manager: AccountManager::with_validator(storage.clone(), address_validator),
            operation_manager: OperationManager::with_validator(storage, operation_validator),
        }
    }

    /// Create a ledger seeded with a genesis distribution
    ///
    /// Each listed holder is credited its amount and the supply counter is
    /// set to the distribution's sum. The backing storage must be empty;
    /// seeding an already-populated ledger fails without touching it.
    pub async fn with_genesis(
        storage: S,
        distribution: &[(Address, TokenAmount)],
    ) -> LedgerResult<Self> {
        let mut ledger = Self::new(storage);
        ledger.seed_genesis(distribution).await?;
        Ok(ledger)
    }

    async fn seed_genesis(&mut self, distribution: &[(Address, TokenAmount)]) -> LedgerResult<()> {
        let storage = &mut self.operation_manager.storage;
        if storage.get_total_supply().await? != 0 || !storage.list_accounts().await?.is_empty() {
            return Err(LedgerError::Validation(
                "Genesis distribution requires an empty ledger".to_string(),
            ));
        }

        let mut supply: TokenAmount = 0;
        for (address, amount) in distribution {
            supply = supply
                .checked_add(*amount)
                .ok_or(LedgerError::AmountOverflow)?;

            // An address may be listed more than once; its shares stack
            let mut account = match storage.get_account(address).await? {
                Some(account) => account,
                None => Account::new(address.clone()),
            };
            account.credit(*amount)?;
            if !account.is_default() {
                storage.save_account(&account).await?;
            }
        }

        storage.set_total_supply(supply).await
    }

    // Mutating operations
    /// Transfer `amount` from `from` to `to` on behalf of `sender`
    ///
    /// `sender` spends its own balance when it is the holder, or burns its
    /// allowance from the holder otherwise. Fails with `NotEnoughBalance`
    /// or `NotEnoughAllowance`; a failed call leaves the ledger untouched.
    pub async fn transfer(
        &mut self,
        sender: &Address,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> LedgerResult<()> {
        self.apply(
            sender,
            Operation::Transfer {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        )
        .await
    }

    /// Set `sender`'s allowance for `spender` to `amount`
    ///
    /// Fails with `IdenticalSpenderSender` when `sender` names itself.
    pub async fn approve(
        &mut self,
        sender: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> LedgerResult<()> {
        self.apply(
            sender,
            Operation::Approve {
                spender: spender.clone(),
                amount,
            },
        )
        .await
    }

    /// Mint the fixed amount of new tokens to `to`
    pub async fn mint(&mut self, sender: &Address, to: &Address) -> LedgerResult<()> {
        self.apply(sender, Operation::Mint { to: to.clone() }).await
    }

    /// Apply an already-built operation on behalf of `sender`
    pub async fn apply(&mut self, sender: &Address, operation: Operation) -> LedgerResult<()> {
        self.operation_manager.apply(sender, operation).await
    }

    // View queries
    /// Balance held by `owner`; zero for an address the ledger never saw
    pub async fn get_balance(&self, owner: &Address) -> LedgerResult<TokenAmount> {
        self.account_manager.balance(owner).await
    }

    /// Remaining approved amount for `spender` out of `owner`'s balance
    ///
    /// Fails with `NoAllowance` when the pair was never approved; a stored
    /// zero answers `Ok(0)`.
    pub async fn get_allowance(
        &self,
        owner: &Address,
        spender: &Address,
    ) -> LedgerResult<TokenAmount> {
        self.account_manager.allowance(owner, spender).await
    }

    /// Ledger-wide supply counter
    pub async fn get_total_supply(&self) -> LedgerResult<TokenAmount> {
        self.account_manager.storage.get_total_supply().await
    }

    /// Snapshot of an account record
    pub async fn get_account(&self, address: &Address) -> LedgerResult<Option<Account>> {
        self.account_manager.get_account(address).await
    }

    /// Snapshots of all account records
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.account_manager.list_accounts().await
    }

    /// Validate the integrity of the ledger
    ///
    /// Recomputes the sum of all balances and checks it against the
    /// recorded supply counter.
    pub async fn validate_integrity(&self) -> LedgerResult<LedgerIntegrityReport> {
        let recorded_supply = self.get_total_supply().await?;
        let accounts = self.account_manager.list_accounts().await?;

        let mut issues = Vec::new();
        let mut computed_supply: TokenAmount = 0;
        for account in &accounts {
            match computed_supply.checked_add(account.balance) {
                Some(sum) => computed_supply = sum,
                None => {
                    issues.push(format!(
                        "Balance sum overflows at account '{}'",
                        account.address
                    ));
                    break;
                }
            }
        }

        if issues.is_empty() && computed_supply != recorded_supply {
            issues.push(format!(
                "Balance sum does not match recorded supply: balances = {}, supply = {}",
                computed_supply, recorded_supply
            ));
        }

        Ok(LedgerIntegrityReport {
            is_valid: issues.is_empty(),
            issues,
            computed_supply,
            recorded_supply,
        })
    }
}

/// Report on ledger integrity and validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub computed_supply: TokenAmount,
    pub recorded_supply: TokenAmount,
}
