//! Ledger module containing account reads and operation processing

pub mod account;
pub mod core;
pub mod operation;

pub use account::*;
pub use core::*;
pub use operation::*;
