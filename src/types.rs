//! Core types and data structures for the token ledger

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Token amounts are whole, non-negative units.
pub type TokenAmount = u64;

/// Number of tokens credited to the target account by a single mint call.
pub const MINT_AMOUNT: TokenAmount = 100;

/// Address of a token holder or spender.
///
/// Addresses are opaque identifiers handed to the ledger by the hosting
/// environment, which has already authenticated the caller. The ledger
/// never derives or verifies them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create an address from its raw string form
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw string form of the address
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Per-holder ledger record
///
/// An account exists in storage once the holder has received tokens or
/// stored at least one allowance entry. Records are never deleted; a
/// holder that spends down to zero keeps its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Holder this record belongs to
    pub address: Address,
    /// Token units currently held
    pub balance: TokenAmount,
    /// Remaining approved amount per spender
    ///
    /// Entries are created lazily by `approve`, so an absent spender is
    /// observably different from a stored zero: the former fails an
    /// allowance query, the latter answers 0.
    pub allowances: HashMap<Address, TokenAmount>,
    /// When the record was created
    pub created_at: NaiveDateTime,
    /// When the record was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a fresh record with a zero balance and no allowances
    pub fn new(address: Address) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            address,
            balance: 0,
            allowances: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add tokens to the balance
    pub fn credit(&mut self, amount: TokenAmount) -> LedgerResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        self.touch();
        Ok(())
    }

    /// Remove tokens from the balance
    pub fn debit(&mut self, amount: TokenAmount) -> LedgerResult<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::NotEnoughBalance)?;
        self.touch();
        Ok(())
    }

    /// Remaining approved amount for `spender`, if an entry was ever stored
    pub fn allowance(&self, spender: &Address) -> Option<TokenAmount> {
        self.allowances.get(spender).copied()
    }

    /// Overwrite the allowance entry for `spender`
    ///
    /// Approvals are absolute: a later call replaces the prior amount, it
    /// never accumulates with it. An approval of 0 stores an explicit 0.
    pub fn set_allowance(&mut self, spender: Address, amount: TokenAmount) {
        self.allowances.insert(spender, amount);
        self.touch();
    }

    /// Burn `amount` from the allowance entry for `spender`
    ///
    /// An absent entry spends like zero but is never materialized; an
    /// entry that reaches zero is kept, recording that the spender was
    /// approved and has exhausted the approval.
    pub fn consume_allowance(
        &mut self,
        spender: &Address,
        amount: TokenAmount,
    ) -> LedgerResult<()> {
        if amount == 0 && !self.allowances.contains_key(spender) {
            return Ok(());
        }
        let remaining = self
            .allowances
            .get_mut(spender)
            .ok_or(LedgerError::NotEnoughAllowance)?;
        *remaining = remaining
            .checked_sub(amount)
            .ok_or(LedgerError::NotEnoughAllowance)?;
        self.touch();
        Ok(())
    }

    /// Whether the record still carries only default values
    pub fn is_default(&self) -> bool {
        self.balance == 0 && self.allowances.is_empty()
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// One invocation of a mutating ledger entrypoint
///
/// The authenticated sender is not part of the operation; it is threaded
/// into `apply` separately, which keeps the engine free of ambient caller
/// state and lets tests replay one operation under different senders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Move `amount` from `from` to `to`, on the holder's own authority or
    /// against the sender's allowance
    Transfer {
        from: Address,
        to: Address,
        amount: TokenAmount,
    },
    /// Set the sender's allowance entry for `spender` to `amount`
    Approve {
        spender: Address,
        amount: TokenAmount,
    },
    /// Credit the fixed mint amount to `to` and raise the total supply
    Mint { to: Address },
}

/// Errors that can occur in the ledger system
///
/// The first four variants are the contract's failure signals and display
/// exactly as their bare names; callers match on the literal text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Self-initiated transfer exceeds the holder's balance
    #[error("NotEnoughBalance")]
    NotEnoughBalance,
    /// Delegated transfer exceeds the sender's remaining approved amount
    #[error("NotEnoughAllowance")]
    NotEnoughAllowance,
    /// Approval names the sender as its own spender
    #[error("IdenticalSpenderSender")]
    IdenticalSpenderSender,
    /// Allowance query for an owner/spender pair with no stored entry
    #[error("NoAllowance")]
    NoAllowance,
    /// A balance or the total supply would exceed the representable range
    #[error("AmountOverflow")]
    AmountOverflow,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
