//! Validation utilities

use crate::traits::*;
use crate::types::*;

/// Validate that an address is well-formed
pub fn validate_address(address: &Address) -> LedgerResult<()> {
    let raw = address.as_str();

    if raw.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Address cannot be empty".to_string(),
        ));
    }

    if raw.len() > 64 {
        return Err(LedgerError::Validation(
            "Address cannot exceed 64 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !raw
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "Address can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Enhanced address validator with detailed checks
pub struct EnhancedAddressValidator;

impl AddressValidator for EnhancedAddressValidator {
    fn validate_address(&self, address: &Address) -> LedgerResult<()> {
        validate_address(address)
    }
}

/// Enhanced operation validator with detailed checks
pub struct EnhancedOperationValidator;

impl OperationValidator for EnhancedOperationValidator {
    fn validate_operation(&self, sender: &Address, operation: &Operation) -> LedgerResult<()> {
        validate_address(sender)?;

        match operation {
            Operation::Transfer { from, to, .. } => {
                validate_address(from)?;
                validate_address(to)
            }
            Operation::Approve { spender, .. } => validate_address(spender),
            Operation::Mint { to } => validate_address(to),
        }
    }
}
