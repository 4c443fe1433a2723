//! Adding, transferring, editing and deleting transactions.

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pocket_domain::{
    Liability, Linkage, Loan, Obligation, ObligationKind, PatrimonyKind, PaymentMethod,
    ProfileData, Transaction, TransactionType, GENERAL_CATEGORY_NAME,
};

use crate::{
    labels::{gift_note, transfer_description},
    obligation_service::{ensure_reducible, remove_obligation_cascade, LedgerObligation},
    savings_service::{ensure_asset_undrawn, remove_asset_cascade, restore_draws},
    validation::{commit, require_category, require_method, require_positive, require_text},
    CoreError, ServiceResult,
};

/// User-supplied parameters for a free-standing income or expense.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub payment_method: PaymentMethod,
    pub category_id: Option<Uuid>,
    pub details: Option<String>,
    pub fixed_expense_id: Option<Uuid>,
}

impl TransactionDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        kind: TransactionType,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            kind,
            payment_method,
            category_id: None,
            details: None,
            fixed_expense_id: None,
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

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

pub struct TransactionService;

impl TransactionService {
    /// Adds a plain income or expense.
    ///
    /// Uncategorised expenses fall into the "General" category when the
    /// profile has one. Expenses dated before the first income are refused.
    pub fn add(data: &ProfileData, draft: TransactionDraft) -> ServiceResult<ProfileData> {
        let description = require_text(&draft.description, "description")?;
        require_positive(draft.amount, "amount")?;
        require_method(data, draft.payment_method)?;
        require_category(data, draft.category_id)?;
        if let Some(id) = draft.fixed_expense_id {
            data.fixed_expense(id)
                .ok_or(CoreError::NotFound("Fixed expense", id))?;
        }

        let mut category_id = draft.category_id;
        if draft.kind == TransactionType::Expense {
            ensure_after_first_income(data.first_income_date(), draft.date)?;
            if category_id.is_none() {
                category_id = data.category_named(GENERAL_CATEGORY_NAME).map(|c| c.id);
            }
        }

        let mut txn = Transaction::new(
            description,
            draft.amount,
            draft.date,
            draft.kind,
            draft.payment_method,
        )
        .with_category(category_id)
        .with_details(draft.details);
        txn.fixed_expense_id = draft.fixed_expense_id;

        let mut candidate = data.clone();
        candidate.transactions.insert(0, txn);
        commit(candidate, "add_transaction")
    }

    /// Records this month's payment of a fixed expense template.
    pub fn pay_fixed_expense(
        data: &ProfileData,
        fixed_expense_id: Uuid,
        payment_method: PaymentMethod,
        date: NaiveDate,
    ) -> ServiceResult<ProfileData> {
        let expense = data
            .fixed_expense(fixed_expense_id)
            .ok_or(CoreError::NotFound("Fixed expense", fixed_expense_id))?;
        let mut draft =
            TransactionDraft::expense(expense.name.clone(), expense.amount, date, payment_method);
        draft.category_id = expense.category_id;
        draft.fixed_expense_id = Some(expense.id);
        Self::add(data, draft)
    }

    /// Moves `amount` between two payment methods as a pair of linked legs.
    pub fn add_transfer(
        data: &ProfileData,
        from: PaymentMethod,
        to: PaymentMethod,
        amount: f64,
        date: NaiveDate,
    ) -> ServiceResult<ProfileData> {
        require_positive(amount, "amount")?;
        require_method(data, from)?;
        require_method(data, to)?;
        if from == to {
            return Err(CoreError::InvalidInput(
                "transfer source and destination must differ".into(),
            ));
        }

        let transfer_id = Uuid::new_v4();
        let description = transfer_description(&data.method_label(from), &data.method_label(to));
        let linkage = Linkage::Transfer { transfer_id };
        let outgoing = Transaction::expense(description.clone(), amount, date, from)
            .with_linkage(linkage.clone());
        let incoming = Transaction::income(description, amount, date, to).with_linkage(linkage);

        let mut candidate = data.clone();
        candidate.transactions.insert(0, incoming);
        candidate.transactions.insert(0, outgoing);
        debug!(%transfer_id, %from, %to, amount, "transfer prepared");
        commit(candidate, "add_transfer")
    }

    /// Deletes a transaction together with everything its linkage implies.
    ///
    /// The cascaded result is validated as a whole; on failure nothing changes.
    pub fn delete(data: &ProfileData, id: Uuid) -> ServiceResult<ProfileData> {
        let target = data
            .transaction(id)
            .ok_or(CoreError::NotFound("Transaction", id))?
            .clone();
        let mut candidate = data.clone();

        match &target.linkage {
            Linkage::None => remove_transaction(&mut candidate, id),
            Linkage::Transfer { transfer_id } => {
                let transfer_id = *transfer_id;
                candidate
                    .transactions
                    .retain(|txn| txn.linkage.transfer_id() != Some(transfer_id));
            }
            Linkage::PatrimonyCreation {
                patrimony,
                patrimony_id,
            } => {
                remove_transaction(&mut candidate, id);
                match patrimony {
                    PatrimonyKind::Asset => {
                        ensure_asset_undrawn(data, *patrimony_id)?;
                        remove_asset_cascade(&mut candidate, *patrimony_id)
                    }
                    PatrimonyKind::Liability => {
                        remove_obligation_cascade::<Liability>(&mut candidate, *patrimony_id)
                    }
                    PatrimonyKind::Loan => {
                        remove_obligation_cascade::<Loan>(&mut candidate, *patrimony_id)
                    }
                }
            }
            Linkage::PatrimonyAddition {
                obligation,
                patrimony_id,
            } => {
                remove_transaction(&mut candidate, id);
                match obligation {
                    ObligationKind::Liability => {
                        revert_addition::<Liability>(&mut candidate, *patrimony_id, target.amount)?
                    }
                    ObligationKind::Loan => {
                        revert_addition::<Loan>(&mut candidate, *patrimony_id, target.amount)?
                    }
                }
            }
            Linkage::SavingsWithdrawal { draws, .. } => {
                remove_transaction(&mut candidate, id);
                restore_draws(&mut candidate, draws);
            }
            Linkage::DebtPayment { liability_id } => {
                remove_transaction(&mut candidate, id);
                if let Some(liability) = Liability::find_mut(&mut candidate, *liability_id) {
                    liability.restore(target.amount);
                }
            }
            Linkage::LoanRepayment { loan_id } => {
                remove_transaction(&mut candidate, id);
                if let Some(loan) = Loan::find_mut(&mut candidate, *loan_id) {
                    loan.restore(target.amount);
                }
            }
        }

        debug!(
            %id,
            linkage = target.linkage.label(),
            removed = data.transactions.len() - candidate.transactions.len(),
            "deletion cascade computed"
        );
        commit(candidate, "delete_transaction")
    }

    /// Replaces a free-standing transaction in place, re-checking balances.
    pub fn update(data: &ProfileData, updated: Transaction) -> ServiceResult<ProfileData> {
        let existing = data
            .transaction(updated.id)
            .ok_or(CoreError::NotFound("Transaction", updated.id))?;
        if !existing.is_user_editable() {
            warn!(id = %updated.id, linkage = existing.linkage.label(), "edit refused");
            return Err(CoreError::NotEditable(updated.id, existing.linkage.label()));
        }
        if !updated.linkage.is_none() {
            return Err(CoreError::InvalidInput(
                "linkage cannot be changed by editing a transaction".into(),
            ));
        }

        let mut updated = updated;
        updated.description = require_text(&updated.description, "description")?;
        if updated.is_gift {
            if !(updated.amount.is_finite() && updated.amount >= 0.0) {
                return Err(CoreError::InvalidInput("amount cannot be negative".into()));
            }
        } else {
            require_positive(updated.amount, "amount")?;
        }
        require_method(data, updated.payment_method)?;
        require_category(data, updated.category_id)?;
        if let Some(fixed_id) = updated.fixed_expense_id {
            data.fixed_expense(fixed_id)
                .ok_or(CoreError::NotFound("Fixed expense", fixed_id))?;
        }
        if updated.is_expense() && !updated.is_gift {
            let first_income = data
                .transactions
                .iter()
                .filter(|txn| txn.id != updated.id && txn.is_income())
                .map(|txn| txn.date)
                .min();
            ensure_after_first_income(first_income, updated.date)?;
        }

        let mut candidate = data.clone();
        if let Some(slot) = candidate.transaction_mut(updated.id) {
            *slot = updated;
        }
        commit(candidate, "update_transaction")
    }

    /// Marks a fixed expense as paid without moving any money.
    pub fn gift_fixed_expense(
        data: &ProfileData,
        fixed_expense_id: Uuid,
        date: NaiveDate,
        details: Option<&str>,
    ) -> ServiceResult<ProfileData> {
        let expense = data
            .fixed_expense(fixed_expense_id)
            .ok_or(CoreError::NotFound("Fixed expense", fixed_expense_id))?;

        let mut txn = Transaction::expense(expense.name.clone(), 0.0, date, PaymentMethod::Cash)
            .with_category(expense.category_id)
            .with_details(Some(gift_note(details)));
        txn.is_gift = true;
        txn.fixed_expense_id = Some(expense.id);

        let mut candidate = data.clone();
        candidate.transactions.insert(0, txn);
        info!(%fixed_expense_id, "fixed expense gifted");
        Ok(candidate)
    }

    /// Advisory confirmation text describing what deleting `id` will do.
    pub fn deletion_prompt(data: &ProfileData, id: Uuid) -> ServiceResult<String> {
        let txn = data
            .transaction(id)
            .ok_or(CoreError::NotFound("Transaction", id))?;
        let prompt = match &txn.linkage {
            Linkage::None => "¿Eliminar esta transacción?".to_string(),
            Linkage::Transfer { .. } => {
                "Esta transacción forma parte de una transferencia. Se eliminarán ambos movimientos."
                    .to_string()
            }
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Asset,
                patrimony_id,
            } => format!(
                "Esta transacción creó el ahorro \"{}\". El ahorro se eliminará por completo.",
                entity_name(data.asset(*patrimony_id).map(|a| a.name.as_str()))
            ),
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Liability,
                patrimony_id,
            } => format!(
                "Esta transacción creó la deuda \"{}\". Se eliminarán la deuda y todas sus transacciones asociadas.",
                entity_name(data.liability(*patrimony_id).map(|l| l.name.as_str()))
            ),
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Loan,
                patrimony_id,
            } => format!(
                "Esta transacción creó el préstamo \"{}\". Se eliminarán el préstamo y todas sus transacciones asociadas.",
                entity_name(data.loan(*patrimony_id).map(|l| l.name.as_str()))
            ),
            Linkage::PatrimonyAddition {
                obligation: ObligationKind::Liability,
                patrimony_id,
            } => format!(
                "Esta transacción amplió la deuda \"{}\". Se restarán {:.2} de su importe.",
                entity_name(data.liability(*patrimony_id).map(|l| l.name.as_str())),
                txn.amount
            ),
            Linkage::PatrimonyAddition {
                obligation: ObligationKind::Loan,
                patrimony_id,
            } => format!(
                "Esta transacción amplió el préstamo \"{}\". Se restarán {:.2} de su importe.",
                entity_name(data.loan(*patrimony_id).map(|l| l.name.as_str())),
                txn.amount
            ),
            Linkage::SavingsWithdrawal { .. } => {
                "Este retiro se revertirá y el valor retirado volverá a los ahorros de origen."
                    .to_string()
            }
            Linkage::DebtPayment { liability_id } => format!(
                "Este pago se revertirá y la deuda \"{}\" volverá a aumentar en {:.2}.",
                entity_name(data.liability(*liability_id).map(|l| l.name.as_str())),
                txn.amount
            ),
            Linkage::LoanRepayment { loan_id } => format!(
                "Este cobro se revertirá y el préstamo \"{}\" volverá a aumentar en {:.2}.",
                entity_name(data.loan(*loan_id).map(|l| l.name.as_str())),
                txn.amount
            ),
        };
        Ok(prompt)
    }
}

fn remove_transaction(data: &mut ProfileData, id: Uuid) {
    data.transactions.retain(|txn| txn.id != id);
}

/// Takes an addition back out of the entity, refusing when more than what
/// remains outstanding has already been paid.
fn revert_addition<T: LedgerObligation>(
    data: &mut ProfileData,
    entity_id: Uuid,
    amount: f64,
) -> ServiceResult<()> {
    if let Some(entity) = T::find_mut(data, entity_id) {
        ensure_reducible(&*entity, amount)?;
        entity.increase(-amount);
    }
    Ok(())
}

fn ensure_after_first_income(first_income: Option<NaiveDate>, date: NaiveDate) -> ServiceResult<()> {
    match first_income {
        Some(first) if date < first => Err(CoreError::InvalidInput(format!(
            "expense dated {date} precedes the first income on {first}"
        ))),
        _ => Ok(()),
    }
}

fn entity_name(name: Option<&str>) -> &str {
    name.unwrap_or("?")
}
