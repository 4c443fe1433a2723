//! pocket-domain
//!
//! Pure domain models (Profile, Transaction, BankAccount, Category, patrimony entities).
//! No I/O, no storage, no balance rules. Only data types and core enums.

pub mod account;
pub mod category;
pub mod common;
pub mod expense;
pub mod patrimony;
pub mod profile;
pub mod transaction;

pub use account::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use patrimony::*;
pub use profile::*;
pub use transaction::*;
