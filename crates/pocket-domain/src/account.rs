use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A bank account tracked as a payment method within a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankAccount {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl BankAccount {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The payment method that routes money through this account.
    pub fn method(&self) -> PaymentMethod {
        PaymentMethod::Bank(self.id)
    }
}

impl Identifiable for BankAccount {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for BankAccount {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for BankAccount {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.color)
    }
}
