//! Shared traits and the payment-method identifier used across the ledger.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name of the reserved cash payment method.
pub const CASH_METHOD_NAME: &str = "Efectivo";

/// Display colour of the reserved cash payment method.
pub const CASH_METHOD_COLOR: &str = "#008f39";

/// Exposes a stable identifier for entities stored in a profile.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Unit across which balances are tracked: the reserved cash method or a bank account.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Bank(Uuid),
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }

    /// Returns the bank account identifier, if this method is a bank account.
    pub fn bank_id(&self) -> Option<Uuid> {
        match self {
            PaymentMethod::Cash => None,
            PaymentMethod::Bank(id) => Some(*id),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("cash"),
            PaymentMethod::Bank(id) => write!(f, "bank:{id}"),
        }
    }
}

impl From<Uuid> for PaymentMethod {
    fn from(id: Uuid) -> Self {
        PaymentMethod::Bank(id)
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
