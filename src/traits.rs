//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;

/// Storage abstraction for the token ledger
///
/// This trait allows the ledger core to work with any persistence substrate
/// (PostgreSQL, a KV store, in-memory, etc.) by implementing these methods.
/// Reads must return snapshot copies; the core never hands out live
/// references to stored state. Durability mechanics belong entirely to the
/// backend, which reports failures through `LedgerError::Storage`.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Insert or overwrite an account record
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Get a snapshot copy of an account record
    async fn get_account(&self, address: &Address) -> LedgerResult<Option<Account>>;

    /// List snapshot copies of all account records
    async fn list_accounts(&self) -> LedgerResult<Vec<Account>>;

    /// Read the ledger-wide supply counter
    async fn get_total_supply(&self) -> LedgerResult<TokenAmount>;

    /// Overwrite the ledger-wide supply counter
    async fn set_total_supply(&mut self, supply: TokenAmount) -> LedgerResult<()>;
}

/// Trait for implementing custom address validation rules
///
/// Validators reject malformed input before it reaches the engine; they
/// never stand in for the contract's own failure signals.
pub trait AddressValidator: Send + Sync {
    /// Validate an address supplied as an argument
    fn validate_address(&self, address: &Address) -> LedgerResult<()>;
}

/// Trait for implementing custom operation validation rules
pub trait OperationValidator: Send + Sync {
    /// Validate an operation and its sender before any state is read
    fn validate_operation(&self, sender: &Address, operation: &Operation) -> LedgerResult<()>;
}

/// Default address validator with basic rules
pub struct DefaultAddressValidator;

impl AddressValidator for DefaultAddressValidator {
    fn validate_address(&self, address: &Address) -> LedgerResult<()> {
        if address.as_str().trim().is_empty() {
            return Err(LedgerError::Validation(
                "Address cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default operation validator with basic rules
pub struct DefaultOperationValidator;

impl OperationValidator for DefaultOperationValidator {
    fn validate_operation(&self, sender: &Address, operation: &Operation) -> LedgerResult<()> {
        let address_validator = DefaultAddressValidator;
        address_validator.validate_address(sender)?;

        match operation {
            Operation::Transfer { from, to, .. } => {
                address_validator.validate_address(from)?;
                address_validator.validate_address(to)
            }
            Operation::Approve { spender, .. } => address_validator.validate_address(spender),
            Operation::Mint { to } => address_validator.validate_address(to),
        }
    }
}
