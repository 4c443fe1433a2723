//! Savings buckets: creating them, spending from them and removing them.

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use pocket_domain::{
    Asset, Linkage, PatrimonyKind, PaymentMethod, ProfileData, SavingsDraw, Transaction,
    SAVINGS_CATEGORY_NAME,
};

use crate::{
    balance::{balance_of, compute_balances},
    labels::{SAVING_DESCRIPTION, WITHDRAWAL_DESCRIPTION},
    validation::{
        commit, require_category, require_method, require_positive, require_text, BALANCE_EPSILON,
    },
    CoreError, ServiceResult,
};

/// Parameters for moving money from a payment method into savings.
#[derive(Debug, Clone)]
pub struct SavingDraft {
    pub name: String,
    pub value: f64,
    pub date: NaiveDate,
    pub source_method: PaymentMethod,
}

impl SavingDraft {
    pub fn new(
        name: impl Into<String>,
        value: f64,
        date: NaiveDate,
        source_method: PaymentMethod,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            date,
            source_method,
        }
    }
}

/// Parameters for paying an expense out of saved money.
#[derive(Debug, Clone)]
pub struct SpendDraft {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub category_id: Option<Uuid>,
    pub source_method: PaymentMethod,
}

impl SpendDraft {
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
        source_method: PaymentMethod,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
            category_id: None,
            source_method,
        }
    }

    pub fn with_category(mut self, category_id: Option<Uuid>) -> Self {
        self.category_id = category_id;
        self
    }
}

pub struct SavingsService;

impl SavingsService {
    /// Total saved value originating from `method`.
    pub fn available(data: &ProfileData, method: PaymentMethod) -> f64 {
        data.assets
            .iter()
            .filter(|asset| asset.source_method == method)
            .map(|asset| asset.value)
            .sum()
    }

    /// Creates an asset together with the expense that funds it.
    pub fn create_saving(data: &ProfileData, draft: SavingDraft) -> ServiceResult<ProfileData> {
        require_positive(draft.value, "value")?;
        require_method(data, draft.source_method)?;
        let balances = compute_balances(&data.transactions, &data.bank_accounts);
        let available = balance_of(&balances, draft.source_method);
        if draft.value > available + BALANCE_EPSILON {
            return Err(CoreError::InsufficientFunds(format!(
                "cannot save {:.2} from {}, only {:.2} available",
                draft.value,
                data.method_label(draft.source_method),
                available
            )));
        }

        let name = require_text(&draft.name, "name")
            .unwrap_or_else(|_| SAVING_DESCRIPTION.to_string());
        let asset = Asset::new(name, draft.value, draft.date, draft.source_method);
        let txn = Transaction::expense(
            SAVING_DESCRIPTION,
            draft.value,
            draft.date,
            draft.source_method,
        )
        .with_category(data.category_named(SAVINGS_CATEGORY_NAME).map(|c| c.id))
        .with_linkage(Linkage::PatrimonyCreation {
            patrimony: PatrimonyKind::Asset,
            patrimony_id: asset.id,
        });

        let mut candidate = data.clone();
        candidate.assets.push(asset);
        candidate.transactions.insert(0, txn);
        commit(candidate, "create_saving")
    }

    /// Pays an expense from savings, consuming the oldest assets of the source first.
    ///
    /// Two transactions are produced: a withdrawal income that returns the
    /// drawn value to the source method, and the expense itself.
    pub fn spend_from_savings(data: &ProfileData, draft: SpendDraft) -> ServiceResult<ProfileData> {
        require_positive(draft.amount, "amount")?;
        let description = require_text(&draft.description, "description")?;
        require_method(data, draft.source_method)?;
        require_category(data, draft.category_id)?;

        let available = Self::available(data, draft.source_method);
        if draft.amount > available + BALANCE_EPSILON {
            return Err(CoreError::InsufficientFunds(format!(
                "only {:.2} saved from {}, cannot spend {:.2}",
                available,
                data.method_label(draft.source_method),
                draft.amount
            )));
        }

        let mut candidate = data.clone();
        let draws = consume_fifo(&mut candidate.assets, draft.source_method, draft.amount);
        debug!(draws = draws.len(), amount = draft.amount, "savings consumed");

        let withdrawal = Transaction::income(
            WITHDRAWAL_DESCRIPTION,
            draft.amount,
            draft.date,
            draft.source_method,
        )
        .with_linkage(Linkage::SavingsWithdrawal {
            source: draft.source_method,
            draws,
        });
        let expense = Transaction::expense(description, draft.amount, draft.date, draft.source_method)
            .with_category(draft.category_id);

        candidate.transactions.insert(0, withdrawal);
        candidate.transactions.insert(0, expense);
        commit(candidate, "spend_from_savings")
    }

    /// Removes an asset and the expense that created it.
    pub fn delete_asset(data: &ProfileData, asset_id: Uuid) -> ServiceResult<ProfileData> {
        if data.asset(asset_id).is_none() {
            return Err(CoreError::NotFound("Asset", asset_id));
        }
        ensure_asset_undrawn(data, asset_id)?;
        let mut candidate = data.clone();
        remove_asset_cascade(&mut candidate, asset_id);
        commit(candidate, "delete_asset")
    }
}

/// Walks the assets of `source` oldest-first, taking value until `amount` is covered.
fn consume_fifo(assets: &mut [Asset], source: PaymentMethod, amount: f64) -> Vec<SavingsDraw> {
    let mut order: Vec<usize> = (0..assets.len())
        .filter(|&index| assets[index].source_method == source)
        .collect();
    order.sort_by_key(|&index| assets[index].date);

    let mut remaining = amount;
    let mut draws = Vec::new();
    for index in order {
        if remaining <= BALANCE_EPSILON {
            break;
        }
        let asset = &mut assets[index];
        let taken = asset.value.min(remaining);
        if taken <= 0.0 {
            continue;
        }
        asset.value -= taken;
        remaining -= taken;
        draws.push(SavingsDraw {
            asset_id: asset.id,
            amount: taken,
        });
    }
    draws
}

/// Refuses to drop an asset whose value has already been withdrawn.
pub(crate) fn ensure_asset_undrawn(data: &ProfileData, asset_id: Uuid) -> ServiceResult<()> {
    let withdrawals = data
        .transactions
        .iter()
        .filter(|txn| match &txn.linkage {
            Linkage::SavingsWithdrawal { draws, .. } => draws
                .iter()
                .any(|draw| draw.asset_id == asset_id && draw.amount > 0.0),
            _ => false,
        })
        .count();
    let created = data
        .transactions
        .iter()
        .find(|txn| {
            matches!(
                txn.linkage,
                Linkage::PatrimonyCreation {
                    patrimony: PatrimonyKind::Asset,
                    patrimony_id,
                } if patrimony_id == asset_id
            )
        })
        .map(|txn| txn.amount);
    let value = data.asset(asset_id).map(|asset| asset.value);
    let spent = matches!(
        (created, value),
        (Some(created), Some(value)) if value + BALANCE_EPSILON < created
    );

    if withdrawals > 0 || spent {
        warn!(%asset_id, withdrawals, "asset removal refused");
        return Err(CoreError::InvalidInput(format!(
            "saving has been spent by {withdrawals} withdrawal(s); delete those first"
        )));
    }
    Ok(())
}

pub(crate) fn remove_asset_cascade(data: &mut ProfileData, asset_id: Uuid) {
    data.assets.retain(|asset| asset.id != asset_id);
    data.transactions.retain(|txn| {
        !matches!(
            txn.linkage,
            Linkage::PatrimonyCreation {
                patrimony: PatrimonyKind::Asset,
                patrimony_id,
            } if patrimony_id == asset_id
        )
    });
}

/// Returns drawn value to the assets that still exist.
pub(crate) fn restore_draws(data: &mut ProfileData, draws: &[SavingsDraw]) {
    for draw in draws {
        if let Some(asset) = data.assets.iter_mut().find(|asset| asset.id == draw.asset_id) {
            asset.value += draw.amount;
        }
    }
}
