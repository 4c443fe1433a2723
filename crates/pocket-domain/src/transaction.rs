//! Domain models for ledger transactions and the linkage that explains them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Direction of a transaction relative to its payment method.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Patrimony entities a transaction can create.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatrimonyKind {
    Asset,
    Liability,
    Loan,
}

/// Patrimony entities carrying an outstanding balance that can grow and be paid down.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    Liability,
    Loan,
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ObligationKind::Liability => "liability",
            ObligationKind::Loan => "loan",
        };
        f.write_str(label)
    }
}

impl From<ObligationKind> for PatrimonyKind {
    fn from(kind: ObligationKind) -> Self {
        match kind {
            ObligationKind::Liability => PatrimonyKind::Liability,
            ObligationKind::Loan => PatrimonyKind::Loan,
        }
    }
}

/// Portion of one asset consumed by a savings withdrawal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SavingsDraw {
    pub asset_id: Uuid,
    pub amount: f64,
}

/// Why a transaction exists. A transaction carries exactly one linkage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Linkage {
    /// Free-standing income or expense.
    #[default]
    None,
    /// One leg of a transfer; both legs share `transfer_id`.
    Transfer { transfer_id: Uuid },
    /// Money moved to create an asset, liability or loan.
    PatrimonyCreation {
        patrimony: PatrimonyKind,
        patrimony_id: Uuid,
    },
    /// Money moved to increase an existing liability or loan.
    PatrimonyAddition {
        obligation: ObligationKind,
        patrimony_id: Uuid,
    },
    /// Bookkeeping income that releases saved value back to its source method.
    SavingsWithdrawal {
        source: PaymentMethod,
        #[serde(default)]
        draws: Vec<SavingsDraw>,
    },
    /// Payment reducing a liability.
    DebtPayment { liability_id: Uuid },
    /// Repayment received on a loan.
    LoanRepayment { loan_id: Uuid },
}

impl Linkage {
    pub fn is_none(&self) -> bool {
        matches!(self, Linkage::None)
    }

    pub fn transfer_id(&self) -> Option<Uuid> {
        match self {
            Linkage::Transfer { transfer_id } => Some(*transfer_id),
            _ => None,
        }
    }

    /// Identifier of the patrimony entity this linkage points at, if any.
    pub fn patrimony_id(&self) -> Option<Uuid> {
        match self {
            Linkage::PatrimonyCreation { patrimony_id, .. }
            | Linkage::PatrimonyAddition { patrimony_id, .. } => Some(*patrimony_id),
            Linkage::DebtPayment { liability_id } => Some(*liability_id),
            Linkage::LoanRepayment { loan_id } => Some(*loan_id),
            Linkage::None | Linkage::Transfer { .. } | Linkage::SavingsWithdrawal { .. } => None,
        }
    }

    /// Returns `true` for linkages that create a patrimony entity.
    pub fn is_creation(&self) -> bool {
        matches!(self, Linkage::PatrimonyCreation { .. })
    }

    /// Short machine-readable label, used in logs and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Linkage::None => "none",
            Linkage::Transfer { .. } => "transfer",
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Asset,
                ..
            } => "asset",
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Liability,
                ..
            } => "liability",
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Loan,
                ..
            } => "loan",
            Linkage::PatrimonyAddition {
                obligation: ObligationKind::Liability,
                ..
            } => "debt-addition",
            Linkage::PatrimonyAddition {
                obligation: ObligationKind::Loan,
                ..
            } => "loan-addition",
            Linkage::SavingsWithdrawal { .. } => "asset-spend",
            Linkage::DebtPayment { .. } => "debt-payment",
            Linkage::LoanRepayment { .. } => "loan-repayment",
        }
    }
}

/// The atomic ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub linkage: Linkage,
    #[serde(default)]
    pub is_gift: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_expense_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionType,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date,
            kind,
            payment_method,
            category_id: None,
            linkage: Linkage::None,
            is_gift: false,
            fixed_expense_id: None,
            details: None,
        }
    }

    pub fn income(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        payment_method: PaymentMethod,
    ) -> Self {
        Self::new(description, amount, date, TransactionType::Income, payment_method)
    }

    pub fn expense(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        payment_method: PaymentMethod,
    ) -> Self {
        Self::new(description, amount, date, TransactionType::Expense, payment_method)
    }

    pub fn with_category(mut self, category_id: Option<Uuid>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details.filter(|text| !text.trim().is_empty());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Effect on the payment method balance; gifts never move money.
    pub fn signed_amount(&self) -> f64 {
        if self.is_gift {
            return 0.0;
        }
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Only free-standing transactions can be edited by the user.
    pub fn is_user_editable(&self) -> bool {
        self.linkage.is_none()
    }

    /// Transfers, patrimony movements and gifts are not real income or spending.
    pub fn is_internal_movement(&self) -> bool {
        self.is_gift || !self.linkage.is_none()
    }

    /// Appends a line to the free-text details.
    pub fn append_details(&mut self, line: &str) {
        self.details = Some(match self.details.take() {
            Some(existing) if !existing.is_empty() => format!("{existing}\n{line}"),
            _ => line.to_string(),
        });
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {:.2} [{}]",
            self.date,
            self.description,
            self.signed_amount(),
            self.linkage.label()
        )
    }
}
