//! Operation processing: the mutating ledger entrypoints

use crate::traits::*;
use crate::types::*;

/// Operation manager applying the mutating entrypoints
///
/// Every operation is validate-then-commit: all preconditions are checked
/// against snapshot reads and the full next state of the affected records
/// is computed before the first storage write. A rejected operation
/// performs zero writes, so storage always holds either the prior state or
/// the fully applied one.
pub struct OperationManager<S: TokenStorage> {
    pub(crate) storage: S,
    validator: Box<dyn OperationValidator>,
}

impl<S: TokenStorage> OperationManager<S> {
    /// Create a new operation manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultOperationValidator),
        }
    }

    /// Create a new operation manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn OperationValidator>) -> Self {
        Self { storage, validator }
    }

    /// Apply one operation on behalf of the authenticated `sender`
    pub async fn apply(&mut self, sender: &Address, operation: Operation) -> LedgerResult<()> {
        self.validator.validate_operation(sender, &operation)?;

        match operation {
            Operation::Transfer { from, to, amount } => {
                self.transfer(sender, &from, &to, amount).await
            }
            Operation::Approve { spender, amount } => {
                self.approve(sender, &spender, amount).await
            }
            Operation::Mint { to } => self.mint(&to).await,
        }
    }

    /// Move `amount` from `from` to `to`
    ///
    /// When `sender` is the holder, only the balance gates the transfer.
    /// When `sender` spends on the holder's behalf, the allowance is
    /// checked and burned first, and an allowance shortfall is reported
    /// even when the balance is also short.
    async fn transfer(
        &mut self,
        sender: &Address,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> LedgerResult<()> {
        let (mut from_account, from_existed) = self.load(from).await?;

        if sender != from {
            from_account.consume_allowance(sender, amount)?;
        }
        from_account.debit(amount)?;

        if to == from {
            // Self-addressed transfer nets out; only the allowance burn
            // (if any) survives into storage.
            from_account.credit(amount)?;
            return self.store(from_account, from_existed).await;
        }

        let (mut to_account, to_existed) = self.load(to).await?;
        to_account.credit(amount)?;

        // All preconditions hold; commit both records.
        self.store(from_account, from_existed).await?;
        self.store(to_account, to_existed).await
    }

    /// Set the sender's allowance entry for `spender` to `amount`
    ///
    /// The write is an absolute overwrite, never an accumulation, and an
    /// approval of 0 stores an explicit 0 entry.
    async fn approve(
        &mut self,
        sender: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> LedgerResult<()> {
        if sender == spender {
            return Err(LedgerError::IdenticalSpenderSender);
        }

        let (mut owner_account, _) = self.load(sender).await?;
        owner_account.set_allowance(spender.clone(), amount);
        self.storage.save_account(&owner_account).await
    }

    /// Credit the fixed mint amount to `to` and raise the total supply
    ///
    /// Open to any sender; the contract carries no admin gate. This is the
    /// only path that changes the supply counter.
    async fn mint(&mut self, to: &Address) -> LedgerResult<()> {
        let supply = self.storage.get_total_supply().await?;
        let new_supply = supply
            .checked_add(MINT_AMOUNT)
            .ok_or(LedgerError::AmountOverflow)?;

        let (mut account, _) = self.load(to).await?;
        account.credit(MINT_AMOUNT)?;

        self.storage.save_account(&account).await?;
        self.storage.set_total_supply(new_supply).await
    }

    /// Snapshot of an account record, or a fresh default when absent
    async fn load(&self, address: &Address) -> LedgerResult<(Account, bool)> {
        match self.storage.get_account(address).await? {
            Some(account) => Ok((account, true)),
            None => Ok((Account::new(address.clone()), false)),
        }
    }

    /// Write a record back, unless it would materialize an all-default
    /// record for an address the ledger has never seen
    async fn store(&mut self, account: Account, existed: bool) -> LedgerResult<()> {
        if existed || !account.is_default() {
            self.storage.save_account(&account).await?;
        }
        Ok(())
    }
}
