//! pocket-core
//!
//! Ledger consistency engine for pocket ledger profiles.
//! Depends on pocket-domain. No terminal I/O, no direct storage interactions.
//!
//! Every mutating operation takes the current [`ProfileData`] snapshot and
//! returns a brand new one, or an error with the input left untouched.
//!
//! [`ProfileData`]: pocket_domain::ProfileData

pub mod balance;
pub mod bank_account_service;
pub mod category_service;
pub mod error;
pub mod expense_template_service;
pub mod labels;
pub mod obligation_service;
pub mod profile_service;
pub mod savings_service;
pub mod storage;
pub mod summary_service;
pub mod time;
pub mod transaction_service;
pub mod validation;

pub use balance::*;
pub use bank_account_service::*;
pub use category_service::*;
pub use error::{CoreError, ServiceResult};
pub use expense_template_service::*;
pub use obligation_service::*;
pub use profile_service::*;
pub use savings_service::*;
pub use summary_service::*;
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction_service::*;
pub use validation::*;
