//! Profiles and the per-profile data snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    account::BankAccount,
    category::Category,
    common::*,
    expense::{FixedExpense, QuickExpense},
    patrimony::{Asset, Liability, Loan},
    transaction::Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything owned by one profile. Transactions are stored most-recent-first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileData {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    #[serde(default)]
    pub quick_expenses: Vec<QuickExpense>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub loans: Vec<Loan>,
}

impl ProfileData {
    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn bank_account(&self, id: Uuid) -> Option<&BankAccount> {
        self.bank_accounts.iter().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.is_named(name))
    }

    pub fn fixed_expense(&self, id: Uuid) -> Option<&FixedExpense> {
        self.fixed_expenses.iter().find(|expense| expense.id == id)
    }

    pub fn quick_expense(&self, id: Uuid) -> Option<&QuickExpense> {
        self.quick_expenses.iter().find(|expense| expense.id == id)
    }

    pub fn asset(&self, id: Uuid) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == id)
    }

    pub fn liability(&self, id: Uuid) -> Option<&Liability> {
        self.liabilities.iter().find(|liability| liability.id == id)
    }

    pub fn liability_mut(&mut self, id: Uuid) -> Option<&mut Liability> {
        self.liabilities.iter_mut().find(|liability| liability.id == id)
    }

    pub fn loan(&self, id: Uuid) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.id == id)
    }

    pub fn loan_mut(&mut self, id: Uuid) -> Option<&mut Loan> {
        self.loans.iter_mut().find(|loan| loan.id == id)
    }

    /// Returns `true` when the method is cash or an existing bank account.
    pub fn knows_method(&self, method: PaymentMethod) -> bool {
        match method {
            PaymentMethod::Cash => true,
            PaymentMethod::Bank(id) => self.bank_account(id).is_some(),
        }
    }

    /// Display name for a payment method, falling back to the raw id for unknown banks.
    pub fn method_label(&self, method: PaymentMethod) -> String {
        match method {
            PaymentMethod::Cash => CASH_METHOD_NAME.to_string(),
            PaymentMethod::Bank(id) => self
                .bank_account(id)
                .map(|account| account.name.clone())
                .unwrap_or_else(|| id.to_string()),
        }
    }

    pub fn method_color(&self, method: PaymentMethod) -> Option<String> {
        match method {
            PaymentMethod::Cash => Some(CASH_METHOD_COLOR.to_string()),
            PaymentMethod::Bank(id) => self.bank_account(id).map(|account| account.color.clone()),
        }
    }

    /// Every payment method balances are tracked for: cash first, then banks in order.
    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        std::iter::once(PaymentMethod::Cash)
            .chain(self.bank_accounts.iter().map(BankAccount::method))
            .collect()
    }

    /// Earliest dated income, if any income exists.
    pub fn first_income_date(&self) -> Option<NaiveDate> {
        self.transactions
            .iter()
            .filter(|txn| txn.is_income())
            .map(|txn| txn.date)
            .min()
    }
}

/// A named ledger, typically one per country or currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub country_code: String,
    pub currency: String,
    #[serde(default)]
    pub data: ProfileData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            country_code: country_code.into(),
            currency: currency.into(),
            data: ProfileData::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Profile {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Profile {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Profile {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.country_code, self.currency)
    }
}

/// The persisted unit: every profile plus the active selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileBook {
    #[serde(default = "ProfileBook::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_profile_id: Option<Uuid>,
}

impl Default for ProfileBook {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            profiles: Vec::new(),
            active_profile_id: None,
        }
    }
}

impl ProfileBook {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn profile(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    pub fn profile_mut(&mut self, id: Uuid) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|profile| profile.id == id)
    }

    pub fn active(&self) -> Option<&Profile> {
        self.active_profile_id.and_then(|id| self.profile(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_deserializes_with_defaults() {
        let data: ProfileData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, ProfileData::default());

        let book: ProfileBook = serde_json::from_str(r#"{"profiles":[]}"#).unwrap();
        assert_eq!(book.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(book.active().is_none());
    }

    #[test]
    fn method_labels_fall_back_to_cash_name() {
        let mut data = ProfileData::default();
        let bank = BankAccount::new("Santander", "#ff0000");
        let method = bank.method();
        data.bank_accounts.push(bank);

        assert_eq!(data.method_label(PaymentMethod::Cash), CASH_METHOD_NAME);
        assert_eq!(data.method_label(method), "Santander");
        assert!(data.knows_method(method));
        assert!(!data.knows_method(PaymentMethod::Bank(Uuid::new_v4())));
        assert_eq!(data.payment_methods().len(), 2);
    }
}
