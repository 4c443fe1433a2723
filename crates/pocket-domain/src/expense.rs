//! Reusable expense templates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A recurring bill. "Paid this month" is inferred from current-month expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedExpense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, amount: f64, category_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category_id,
            icon: None,
        }
    }
}

/// A one-tap expense shortcut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuickExpense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl QuickExpense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        category_id: Option<Uuid>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category_id,
            icon: Some(icon.into()),
        }
    }
}

impl Identifiable for FixedExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for FixedExpense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for FixedExpense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Identifiable for QuickExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for QuickExpense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for QuickExpense {
    fn amount(&self) -> f64 {
        self.amount
    }
}
