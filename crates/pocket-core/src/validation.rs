//! Balance feasibility checks and input guards shared by every mutation.

use pocket_domain::{BankAccount, PaymentMethod, ProfileData, Transaction, CASH_METHOD_NAME};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{balance::compute_balances, CoreError, ServiceResult};

/// Tolerance applied when deciding whether a balance went negative.
pub const BALANCE_EPSILON: f64 = 1e-9;

/// Checks a prospective transaction list, returning a message when any
/// payment method would end up with a negative balance.
pub fn validate_transaction_change(
    transactions: &[Transaction],
    bank_accounts: &[BankAccount],
) -> Option<String> {
    let balances = compute_balances(transactions, bank_accounts);
    let (method, balance) = balances
        .iter()
        .find(|(_, balance)| **balance < -BALANCE_EPSILON)?;
    let label = match method {
        PaymentMethod::Cash => CASH_METHOD_NAME.to_string(),
        PaymentMethod::Bank(id) => bank_accounts
            .iter()
            .find(|account| account.id == *id)
            .map(|account| account.name.clone())
            .unwrap_or_else(|| id.to_string()),
    };
    Some(format!("balance of {} would drop to {:.2}", label, balance))
}

/// The single commit gate: fails with [`CoreError::InsufficientFunds`] when
/// the candidate snapshot drives any method negative.
pub fn ensure_valid(candidate: &ProfileData) -> ServiceResult<()> {
    match validate_transaction_change(&candidate.transactions, &candidate.bank_accounts) {
        Some(message) => Err(CoreError::InsufficientFunds(message)),
        None => Ok(()),
    }
}

/// Runs [`ensure_valid`] on a candidate and hands it back when it may be installed.
pub(crate) fn commit(candidate: ProfileData, operation: &'static str) -> ServiceResult<ProfileData> {
    if let Err(err) = ensure_valid(&candidate) {
        warn!(operation, error = %err, "mutation rejected");
        return Err(err);
    }
    info!(
        operation,
        transactions = candidate.transactions.len(),
        "mutation committed"
    );
    Ok(candidate)
}

pub(crate) fn require_positive(amount: f64, field: &str) -> ServiceResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "{field} must be greater than zero"
        )))
    }
}

pub(crate) fn require_text(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_method(data: &ProfileData, method: PaymentMethod) -> ServiceResult<()> {
    match method {
        PaymentMethod::Bank(id) if !data.knows_method(method) => {
            Err(CoreError::NotFound("Payment method", id))
        }
        _ => Ok(()),
    }
}

pub(crate) fn require_category(data: &ProfileData, category_id: Option<Uuid>) -> ServiceResult<()> {
    match category_id {
        Some(id) if data.category(id).is_none() => Err(CoreError::NotFound("Category", id)),
        _ => Ok(()),
    }
}
