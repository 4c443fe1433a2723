//! Savings (assets), debts (liabilities) and money lent out (loans).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, transaction::ObligationKind};

/// Remaining balance at or below which an obligation counts as settled.
pub const SETTLED_THRESHOLD: f64 = 0.01;

/// Money moved out of a payment method into a savings bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub value: f64,
    pub date: NaiveDate,
    pub source_method: PaymentMethod,
}

impl Asset {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        date: NaiveDate,
        source_method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
            date,
            source_method,
        }
    }
}

impl Identifiable for Asset {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Asset {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Asset {
    fn amount(&self) -> f64 {
        self.value
    }
}

/// An increase recorded without a balance-affecting transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialAddition {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl InitialAddition {
    pub fn new(amount: f64, date: NaiveDate, details: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            details,
        }
    }
}

/// A debt owed by the profile owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liability {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub amount: f64,
    pub original_amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_method: Option<PaymentMethod>,
    #[serde(default)]
    pub initial_additions: Vec<InitialAddition>,
}

impl Liability {
    pub fn new(
        name: impl Into<String>,
        details: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        destination_method: Option<PaymentMethod>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            details: details.into(),
            amount,
            original_amount: amount,
            date,
            destination_method,
            initial_additions: Vec::new(),
        }
    }
}

/// Money lent out by the profile owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loan {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub details: String,
    pub amount: f64,
    pub original_amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_method: Option<PaymentMethod>,
    #[serde(default)]
    pub initial_additions: Vec<InitialAddition>,
}

impl Loan {
    pub fn new(
        name: impl Into<String>,
        details: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        source_method: Option<PaymentMethod>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            details: details.into(),
            amount,
            original_amount: amount,
            date,
            source_method,
            initial_additions: Vec::new(),
        }
    }
}

/// Shared balance bookkeeping for liabilities and loans.
///
/// `amount` is the live remaining balance and `original_amount` the all-time
/// issued amount; `amount <= original_amount` holds after every method here.
pub trait Obligation: Identifiable + NamedEntity {
    const KIND: ObligationKind;

    fn amount(&self) -> f64;
    fn original_amount(&self) -> f64;
    fn set_balances(&mut self, amount: f64, original_amount: f64);
    fn initial_additions(&self) -> &[InitialAddition];
    fn initial_additions_mut(&mut self) -> &mut Vec<InitialAddition>;

    /// Quantity already paid back.
    fn paid_amount(&self) -> f64 {
        self.original_amount() - self.amount()
    }

    fn progress_percent(&self) -> f64 {
        if self.original_amount() > 0.0 {
            self.paid_amount() / self.original_amount() * 100.0
        } else {
            0.0
        }
    }

    fn is_settled(&self) -> bool {
        self.amount() <= SETTLED_THRESHOLD
    }

    /// Grows both the live and the issued amount in lockstep.
    fn increase(&mut self, delta: f64) {
        let (amount, original) = (self.amount() + delta, self.original_amount() + delta);
        self.set_balances(amount, original);
    }

    fn reduce(&mut self, paid: f64) {
        let original = self.original_amount();
        self.set_balances(self.amount() - paid, original);
    }

    /// Undoes a payment, never exceeding the issued amount.
    fn restore(&mut self, paid: f64) {
        let original = self.original_amount();
        self.set_balances((self.amount() + paid).min(original), original);
    }

    /// Corrects the issued amount while preserving the quantity already paid.
    fn correct_original(&mut self, new_original: f64) {
        let paid = self.paid_amount();
        self.set_balances(new_original - paid, new_original);
    }
}

impl Obligation for Liability {
    const KIND: ObligationKind = ObligationKind::Liability;

    fn amount(&self) -> f64 {
        self.amount
    }

    fn original_amount(&self) -> f64 {
        self.original_amount
    }

    fn set_balances(&mut self, amount: f64, original_amount: f64) {
        self.amount = amount;
        self.original_amount = original_amount;
    }

    fn initial_additions(&self) -> &[InitialAddition] {
        &self.initial_additions
    }

    fn initial_additions_mut(&mut self) -> &mut Vec<InitialAddition> {
        &mut self.initial_additions
    }
}

impl Obligation for Loan {
    const KIND: ObligationKind = ObligationKind::Loan;

    fn amount(&self) -> f64 {
        self.amount
    }

    fn original_amount(&self) -> f64 {
        self.original_amount
    }

    fn set_balances(&mut self, amount: f64, original_amount: f64) {
        self.amount = amount;
        self.original_amount = original_amount;
    }

    fn initial_additions(&self) -> &[InitialAddition] {
        &self.initial_additions
    }

    fn initial_additions_mut(&mut self) -> &mut Vec<InitialAddition> {
        &mut self.initial_additions
    }
}

impl Identifiable for Liability {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Liability {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Identifiable for Loan {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Loan {
    fn name(&self) -> &str {
        &self.name
    }
}
