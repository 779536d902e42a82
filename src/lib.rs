//! # Token Core
//!
//! A fungible-token account ledger with delegated spending allowances,
//! controlled minting, and read-only view queries.
//!
//! ## Features
//!
//! - **Balance transfers**: holder-initiated and allowance-delegated, with
//!   exact failure signals (`NotEnoughBalance`, `NotEnoughAllowance`)
//! - **Allowance management**: absolute-set approvals with observable
//!   absent-vs-zero entries and self-approval rejection
//! - **Minting**: fixed-amount supply faucet, the sole source of new tokens
//! - **View queries**: balance, allowance, and total-supply snapshots
//! - **Atomic transitions**: every operation fully commits or leaves the
//!   ledger byte-for-byte untouched
//! - **Storage abstraction**: database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use token_core::{Address, MemoryStorage, TokenLedger};
//!
//! # async fn demo() -> Result<(), token_core::LedgerError> {
//! let alice = Address::from("alice");
//! let bob = Address::from("bob");
//!
//! let storage = MemoryStorage::new();
//! let mut ledger = TokenLedger::with_genesis(storage, &[(alice.clone(), 1_000)]).await?;
//!
//! ledger.transfer(&alice, &alice, &bob, 250).await?;
//! assert_eq!(ledger.get_balance(&bob).await?, 250);
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;
