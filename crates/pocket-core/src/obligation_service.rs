//! Lifecycle of liabilities (debts) and loans.
//!
//! Both entities share the same bookkeeping with the money flow reversed:
//! borrowing brings money into a payment method and paying it back takes it
//! out, while lending takes money out and being repaid brings it back.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use pocket_domain::{
    InitialAddition, Liability, Linkage, Loan, Obligation, PaymentMethod, ProfileData, Transaction,
    TransactionType, SETTLED_THRESHOLD,
};

use crate::{
    labels::archived_debt_note,
    validation::{commit, require_method, require_positive, require_text},
    CoreError, ServiceResult,
};

/// Binds an [`Obligation`] to its collection and transaction conventions.
pub trait LedgerObligation: Obligation + Clone {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn entries(data: &ProfileData) -> &[Self];
    fn entries_mut(data: &mut ProfileData) -> &mut Vec<Self>;
    fn build(
        name: String,
        details: String,
        amount: f64,
        date: NaiveDate,
        method: Option<PaymentMethod>,
    ) -> Self;
    fn set_text(&mut self, name: String, details: String);

    /// Direction of the movement that creates or enlarges the obligation.
    fn issue_type() -> TransactionType;
    fn creation_description(name: &str) -> String;
    fn addition_description(name: &str) -> String;
    fn settlement_description(name: &str) -> String;
    fn settlement_linkage(id: Uuid) -> Linkage;

    /// Direction of the movement that pays the obligation down.
    fn settle_type() -> TransactionType {
        match Self::issue_type() {
            TransactionType::Income => TransactionType::Expense,
            TransactionType::Expense => TransactionType::Income,
        }
    }

    fn find(data: &ProfileData, id: Uuid) -> Option<&Self> {
        Self::entries(data).iter().find(|entry| entry.id() == id)
    }

    fn find_mut(data: &mut ProfileData, id: Uuid) -> Option<&mut Self> {
        Self::entries_mut(data)
            .iter_mut()
            .find(|entry| entry.id() == id)
    }
}

impl LedgerObligation for Liability {
    const ENTITY: &'static str = "Liability";

    fn entries(data: &ProfileData) -> &[Self] {
        &data.liabilities
    }

    fn entries_mut(data: &mut ProfileData) -> &mut Vec<Self> {
        &mut data.liabilities
    }

    fn build(
        name: String,
        details: String,
        amount: f64,
        date: NaiveDate,
        method: Option<PaymentMethod>,
    ) -> Self {
        Liability::new(name, details, amount, date, method)
    }

    fn set_text(&mut self, name: String, details: String) {
        self.name = name;
        self.details = details;
    }

    fn issue_type() -> TransactionType {
        TransactionType::Income
    }

    fn creation_description(name: &str) -> String {
        format!("Deuda: {name}")
    }

    fn addition_description(name: &str) -> String {
        format!("Ampliación deuda: {name}")
    }

    fn settlement_description(name: &str) -> String {
        format!("Pago deuda: {name}")
    }

    fn settlement_linkage(id: Uuid) -> Linkage {
        Linkage::DebtPayment { liability_id: id }
    }
}

impl LedgerObligation for Loan {
    const ENTITY: &'static str = "Loan";

    fn entries(data: &ProfileData) -> &[Self] {
        &data.loans
    }

    fn entries_mut(data: &mut ProfileData) -> &mut Vec<Self> {
        &mut data.loans
    }

    fn build(
        name: String,
        details: String,
        amount: f64,
        date: NaiveDate,
        method: Option<PaymentMethod>,
    ) -> Self {
        Loan::new(name, details, amount, date, method)
    }

    fn set_text(&mut self, name: String, details: String) {
        self.name = name;
        self.details = details;
    }

    fn issue_type() -> TransactionType {
        TransactionType::Expense
    }

    fn creation_description(name: &str) -> String {
        format!("Préstamo: {name}")
    }

    fn addition_description(name: &str) -> String {
        format!("Ampliación préstamo: {name}")
    }

    fn settlement_description(name: &str) -> String {
        format!("Cobro préstamo: {name}")
    }

    fn settlement_linkage(id: Uuid) -> Linkage {
        Linkage::LoanRepayment { loan_id: id }
    }
}

/// Parameters for registering a new liability or loan.
#[derive(Debug, Clone)]
pub struct ObligationDraft {
    pub name: String,
    pub details: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// Where the money lands (liability) or leaves from (loan).
    pub method: Option<PaymentMethod>,
    /// Record the entity without moving any balance.
    pub initial: bool,
}

impl ObligationDraft {
    pub fn new(name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            details: String::new(),
            amount,
            date,
            method: None,
            initial: true,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Backs the obligation with a real movement on `method`.
    pub fn through(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self.initial = false;
        self
    }
}

/// Parameters for increasing an existing liability or loan.
#[derive(Debug, Clone)]
pub struct AdditionDraft {
    pub amount: f64,
    pub date: NaiveDate,
    pub details: Option<String>,
    pub method: Option<PaymentMethod>,
    pub initial: bool,
}

impl AdditionDraft {
    pub fn initial(amount: f64, date: NaiveDate) -> Self {
        Self {
            amount,
            date,
            details: None,
            method: None,
            initial: true,
        }
    }

    pub fn through(amount: f64, date: NaiveDate, method: PaymentMethod) -> Self {
        Self {
            amount,
            date,
            details: None,
            method: Some(method),
            initial: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Editable fields of a liability or loan.
#[derive(Debug, Clone)]
pub struct ObligationEdit {
    pub name: String,
    pub details: String,
    pub original_amount: f64,
}

/// One entry of a batch payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObligationPayment {
    pub entity_id: Uuid,
    pub amount: f64,
}

impl ObligationPayment {
    pub fn new(entity_id: Uuid, amount: f64) -> Self {
        Self { entity_id, amount }
    }
}

pub struct ObligationService;

impl ObligationService {
    pub fn save_liability(data: &ProfileData, draft: ObligationDraft) -> ServiceResult<ProfileData> {
        Self::create::<Liability>(data, draft)
    }

    pub fn save_loan(data: &ProfileData, draft: ObligationDraft) -> ServiceResult<ProfileData> {
        Self::create::<Loan>(data, draft)
    }

    pub fn add_value_to_liability(
        data: &ProfileData,
        liability_id: Uuid,
        draft: AdditionDraft,
    ) -> ServiceResult<ProfileData> {
        Self::add_value::<Liability>(data, liability_id, draft)
    }

    pub fn add_value_to_loan(
        data: &ProfileData,
        loan_id: Uuid,
        draft: AdditionDraft,
    ) -> ServiceResult<ProfileData> {
        Self::add_value::<Loan>(data, loan_id, draft)
    }

    pub fn update_liability(
        data: &ProfileData,
        liability_id: Uuid,
        edit: ObligationEdit,
    ) -> ServiceResult<ProfileData> {
        Self::update::<Liability>(data, liability_id, edit)
    }

    pub fn update_loan(
        data: &ProfileData,
        loan_id: Uuid,
        edit: ObligationEdit,
    ) -> ServiceResult<ProfileData> {
        Self::update::<Loan>(data, loan_id, edit)
    }

    pub fn update_liability_addition(
        data: &ProfileData,
        liability_id: Uuid,
        addition_id: Uuid,
        amount: f64,
    ) -> ServiceResult<ProfileData> {
        Self::update_addition::<Liability>(data, liability_id, addition_id, amount)
    }

    pub fn update_loan_addition(
        data: &ProfileData,
        loan_id: Uuid,
        addition_id: Uuid,
        amount: f64,
    ) -> ServiceResult<ProfileData> {
        Self::update_addition::<Loan>(data, loan_id, addition_id, amount)
    }

    /// Pays several debts from one method; either every payment commits or none does.
    pub fn pay_debts(
        data: &ProfileData,
        payments: &[ObligationPayment],
        method: PaymentMethod,
        date: NaiveDate,
    ) -> ServiceResult<ProfileData> {
        Self::settle::<Liability>(data, payments, method, date)
    }

    /// Registers repayments received on several loans into one method.
    pub fn receive_loan_payments(
        data: &ProfileData,
        payments: &[ObligationPayment],
        method: PaymentMethod,
        date: NaiveDate,
    ) -> ServiceResult<ProfileData> {
        Self::settle::<Loan>(data, payments, method, date)
    }

    /// Archives a settled liability, or removes an active one with every linked transaction.
    pub fn delete_liability(data: &ProfileData, liability_id: Uuid) -> ServiceResult<ProfileData> {
        let liability = Liability::find(data, liability_id)
            .ok_or(CoreError::NotFound(Liability::ENTITY, liability_id))?;
        if !liability.is_settled() {
            return Self::hard_delete::<Liability>(data, liability_id);
        }

        let note = archived_debt_note(&liability.name);
        let mut candidate = data.clone();
        candidate.liabilities.retain(|entry| entry.id != liability_id);
        let mut unlinked = 0usize;
        for txn in candidate
            .transactions
            .iter_mut()
            .filter(|txn| txn.linkage.patrimony_id() == Some(liability_id))
        {
            txn.linkage = Linkage::None;
            txn.append_details(&note);
            unlinked += 1;
        }
        debug!(%liability_id, unlinked, "liability archived");
        commit(candidate, "archive_liability")
    }

    pub fn delete_loan(data: &ProfileData, loan_id: Uuid) -> ServiceResult<ProfileData> {
        Self::hard_delete::<Loan>(data, loan_id)
    }

    fn create<T: LedgerObligation>(
        data: &ProfileData,
        draft: ObligationDraft,
    ) -> ServiceResult<ProfileData> {
        let name = require_text(&draft.name, "name")?;
        require_positive(draft.amount, "amount")?;
        if let Some(method) = draft.method {
            require_method(data, method)?;
        }

        let entity = T::build(
            name.clone(),
            draft.details.trim().to_string(),
            draft.amount,
            draft.date,
            draft.method,
        );
        let entity_id = entity.id();
        let mut candidate = data.clone();
        T::entries_mut(&mut candidate).push(entity);

        if draft.initial {
            info!(kind = %T::KIND, %entity_id, "initial obligation recorded");
            return Ok(candidate);
        }

        let method = draft.method.ok_or_else(|| {
            CoreError::InvalidInput("a payment method is required unless the movement is initial".into())
        })?;
        let txn = Transaction::new(
            T::creation_description(&name),
            draft.amount,
            draft.date,
            T::issue_type(),
            method,
        )
        .with_linkage(Linkage::PatrimonyCreation {
            patrimony: T::KIND.into(),
            patrimony_id: entity_id,
        })
        .with_details(Some(draft.details));
        candidate.transactions.insert(0, txn);
        commit(candidate, "create_obligation")
    }

    fn add_value<T: LedgerObligation>(
        data: &ProfileData,
        entity_id: Uuid,
        draft: AdditionDraft,
    ) -> ServiceResult<ProfileData> {
        require_positive(draft.amount, "amount")?;
        let name = T::find(data, entity_id)
            .ok_or(CoreError::NotFound(T::ENTITY, entity_id))?
            .name()
            .to_string();
        let details = draft.details.filter(|text| !text.trim().is_empty());

        let mut candidate = data.clone();
        if draft.initial {
            if let Some(entity) = T::find_mut(&mut candidate, entity_id) {
                entity
                    .initial_additions_mut()
                    .push(InitialAddition::new(draft.amount, draft.date, details));
                entity.increase(draft.amount);
            }
            info!(kind = %T::KIND, %entity_id, amount = draft.amount, "initial addition recorded");
            return Ok(candidate);
        }

        let method = draft.method.ok_or_else(|| {
            CoreError::InvalidInput("a payment method is required unless the movement is initial".into())
        })?;
        require_method(data, method)?;
        let txn = Transaction::new(
            T::addition_description(&name),
            draft.amount,
            draft.date,
            T::issue_type(),
            method,
        )
        .with_linkage(Linkage::PatrimonyAddition {
            obligation: T::KIND,
            patrimony_id: entity_id,
        })
        .with_details(details);
        candidate.transactions.insert(0, txn);
        if let Some(entity) = T::find_mut(&mut candidate, entity_id) {
            entity.increase(draft.amount);
        }
        commit(candidate, "add_obligation_value")
    }

    fn update<T: LedgerObligation>(
        data: &ProfileData,
        entity_id: Uuid,
        edit: ObligationEdit,
    ) -> ServiceResult<ProfileData> {
        let name = require_text(&edit.name, "name")?;
        require_positive(edit.original_amount, "original amount")?;
        let current = T::find(data, entity_id).ok_or(CoreError::NotFound(T::ENTITY, entity_id))?;
        if edit.original_amount + SETTLED_THRESHOLD < current.paid_amount() {
            return Err(CoreError::InvalidInput(format!(
                "original amount {:.2} is below the {:.2} already paid",
                edit.original_amount,
                current.paid_amount()
            )));
        }

        let mut candidate = data.clone();
        if let Some(entity) = T::find_mut(&mut candidate, entity_id) {
            entity.set_text(name, edit.details.trim().to_string());
            entity.correct_original(edit.original_amount);
        }
        commit(candidate, "update_obligation")
    }

    fn update_addition<T: LedgerObligation>(
        data: &ProfileData,
        entity_id: Uuid,
        addition_id: Uuid,
        amount: f64,
    ) -> ServiceResult<ProfileData> {
        require_positive(amount, "amount")?;
        let mut candidate = data.clone();
        let entity = T::find_mut(&mut candidate, entity_id)
            .ok_or(CoreError::NotFound(T::ENTITY, entity_id))?;
        let addition = entity
            .initial_additions_mut()
            .iter_mut()
            .find(|addition| addition.id == addition_id)
            .ok_or(CoreError::NotFound("Addition", addition_id))?;
        let delta = amount - addition.amount;
        addition.amount = amount;
        ensure_reducible(&*entity, -delta)?;
        entity.increase(delta);
        debug!(%entity_id, %addition_id, delta, "addition updated");
        Ok(candidate)
    }

    fn settle<T: LedgerObligation>(
        data: &ProfileData,
        payments: &[ObligationPayment],
        method: PaymentMethod,
        date: NaiveDate,
    ) -> ServiceResult<ProfileData> {
        if payments.is_empty() {
            return Err(CoreError::InvalidInput("at least one payment is required".into()));
        }
        require_method(data, method)?;

        let mut candidate = data.clone();
        for payment in payments {
            require_positive(payment.amount, "payment amount")?;
            let entity = T::find_mut(&mut candidate, payment.entity_id)
                .ok_or(CoreError::NotFound(T::ENTITY, payment.entity_id))?;
            if payment.amount > entity.amount() + SETTLED_THRESHOLD {
                return Err(CoreError::InvalidInput(format!(
                    "payment of {:.2} exceeds the {:.2} outstanding on {}",
                    payment.amount,
                    entity.amount(),
                    entity.name()
                )));
            }
            entity.reduce(payment.amount);
            let txn = Transaction::new(
                T::settlement_description(entity.name()),
                payment.amount,
                date,
                T::settle_type(),
                method,
            )
            .with_linkage(T::settlement_linkage(payment.entity_id));
            candidate.transactions.insert(0, txn);
        }
        commit(candidate, "settle_obligations")
    }

    fn hard_delete<T: LedgerObligation>(
        data: &ProfileData,
        entity_id: Uuid,
    ) -> ServiceResult<ProfileData> {
        if T::find(data, entity_id).is_none() {
            return Err(CoreError::NotFound(T::ENTITY, entity_id));
        }
        let mut candidate = data.clone();
        remove_obligation_cascade::<T>(&mut candidate, entity_id);
        commit(candidate, "delete_obligation")
    }
}

/// Fails when taking `reduction` off the outstanding amount would leave it negative.
pub(crate) fn ensure_reducible<T: Obligation>(entity: &T, reduction: f64) -> ServiceResult<()> {
    if entity.amount() - reduction < -SETTLED_THRESHOLD {
        return Err(CoreError::InvalidInput(format!(
            "cannot take {:.2} off {}, only {:.2} is still outstanding",
            reduction,
            entity.name(),
            entity.amount()
        )));
    }
    Ok(())
}

/// Drops the entity and every transaction linked to it.
pub(crate) fn remove_obligation_cascade<T: LedgerObligation>(data: &mut ProfileData, entity_id: Uuid) {
    T::entries_mut(data).retain(|entry| entry.id() != entity_id);
    let before = data.transactions.len();
    data.transactions
        .retain(|txn| txn.linkage.patrimony_id() != Some(entity_id));
    debug!(
        kind = %T::KIND,
        %entity_id,
        removed = before - data.transactions.len(),
        "obligation cascade"
    );
}
