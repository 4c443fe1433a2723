use chrono::NaiveDate;
use pocket_core::{
    balance_of, compute_balances, total_balance, AdditionDraft, BankAccountService, CoreError,
    ExpenseTemplateService, FixedClock, ObligationDraft, ObligationEdit, ObligationPayment,
    ObligationService, ProfileService, SavingDraft, SavingsService, SpendDraft, SummaryService,
    TemplateDraft, TransactionDraft, TransactionService, BALANCE_EPSILON,
};
use pocket_domain::{Linkage, PaymentMethod, ProfileBook, ProfileData, SavingsDraw, Transaction};

type Attempt = dyn Fn(&ProfileData) -> Result<ProfileData, CoreError>;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn balance(data: &ProfileData, method: PaymentMethod) -> f64 {
    balance_of(
        &compute_balances(&data.transactions, &data.bank_accounts),
        method,
    )
}

fn cash(data: &ProfileData) -> f64 {
    balance(data, PaymentMethod::Cash)
}

fn with_income(amount: f64) -> ProfileData {
    TransactionService::add(
        &ProfileData::default(),
        TransactionDraft::income("Nómina", amount, day(1), PaymentMethod::Cash),
    )
    .expect("income")
}

fn with_bank(data: &ProfileData) -> (ProfileData, PaymentMethod) {
    let data = BankAccountService::add(data, "Banco A", "#123456").expect("bank");
    let method = data.bank_accounts[0].method();
    (data, method)
}

fn assert_no_negative_balances(data: &ProfileData) {
    let balances = compute_balances(&data.transactions, &data.bank_accounts);
    for (method, value) in balances {
        assert!(value >= -BALANCE_EPSILON, "{method} went negative: {value}");
    }
}

#[test]
fn overspending_cash_is_rejected_and_balance_kept() {
    let data = with_income(100.0);
    let err = TransactionService::add(
        &data,
        TransactionDraft::expense("Televisor", 150.0, day(2), PaymentMethod::Cash),
    )
    .unwrap_err();

    assert!(err.is_insufficient_funds());
    assert_eq!(cash(&data), 100.0);
}

#[test]
fn rejected_operation_leaves_profile_book_identical() {
    let mut book = ProfileBook::default();
    ProfileService::create_profile(&mut book, "Main", "ES", "EUR").expect("profile");
    ProfileService::apply(&mut book, |data| {
        TransactionService::add(
            data,
            TransactionDraft::income("Nómina", 100.0, day(1), PaymentMethod::Cash),
        )
    })
    .expect("income");
    let before = book.clone();

    let result = ProfileService::apply(&mut book, |data| {
        TransactionService::add(
            data,
            TransactionDraft::expense("Televisor", 150.0, day(2), PaymentMethod::Cash),
        )
    });

    assert!(result.is_err());
    assert_eq!(book, before);
}

#[test]
fn transfer_conserves_total_and_deletes_both_legs() {
    let (data, bank) = with_bank(&with_income(100.0));
    let total_before = total_balance(&compute_balances(&data.transactions, &data.bank_accounts));

    let moved = TransactionService::add_transfer(&data, PaymentMethod::Cash, bank, 40.0, day(2))
        .expect("transfer");
    assert_eq!(cash(&moved), 60.0);
    assert_eq!(balance(&moved, bank), 40.0);
    assert_eq!(
        total_balance(&compute_balances(&moved.transactions, &moved.bank_accounts)),
        total_before
    );
    assert_eq!(moved.transactions[0].description, "Transferencia: Efectivo → Banco A");

    let incoming_leg = moved
        .transactions
        .iter()
        .find(|txn| txn.is_income() && txn.linkage.transfer_id().is_some())
        .expect("income leg")
        .id;
    let restored = TransactionService::delete(&moved, incoming_leg).expect("deleted");
    assert_eq!(restored.transactions.len(), data.transactions.len());
    assert!(restored
        .transactions
        .iter()
        .all(|txn| txn.linkage.transfer_id().is_none()));
    assert_eq!(cash(&restored), 100.0);
    assert_eq!(balance(&restored, bank), 0.0);
}

#[test]
fn liability_lifecycle_keeps_original_amount() {
    let data = ObligationService::save_liability(
        &ProfileData::default(),
        ObligationDraft::new("Car loan", 1000.0, day(1)).through(PaymentMethod::Cash),
    )
    .expect("borrowed");
    assert_eq!(cash(&data), 1000.0);
    let id = data.liabilities[0].id;
    assert_eq!(data.liabilities[0].amount, 1000.0);

    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 300.0)],
        PaymentMethod::Cash,
        day(2),
    )
    .expect("paid");
    assert_eq!(cash(&data), 700.0);
    assert_eq!(data.liabilities[0].amount, 700.0);
    assert_eq!(data.liabilities[0].original_amount, 1000.0);

    let data = ObligationService::update_liability(
        &data,
        id,
        ObligationEdit {
            name: "Car loan".into(),
            details: "renegociado".into(),
            original_amount: 1200.0,
        },
    )
    .expect("corrected");
    let liability = &data.liabilities[0];
    assert_eq!(liability.amount, 900.0);
    assert_eq!(liability.original_amount, 1200.0);
    assert!(liability.amount <= liability.original_amount);
}

#[test]
fn deleting_a_debt_payment_restores_the_liability() {
    let data = ObligationService::save_liability(
        &ProfileData::default(),
        ObligationDraft::new("Tarjeta", 500.0, day(1)).through(PaymentMethod::Cash),
    )
    .expect("borrowed");
    let id = data.liabilities[0].id;
    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 200.0)],
        PaymentMethod::Cash,
        day(2),
    )
    .expect("paid");
    let payment = data.transactions[0].id;
    assert_eq!(data.transactions[0].linkage, Linkage::DebtPayment { liability_id: id });

    let prompt = TransactionService::deletion_prompt(&data, payment).expect("prompt");
    assert!(prompt.contains("Tarjeta"));

    let data = TransactionService::delete(&data, payment).expect("reverted");
    assert_eq!(data.liabilities[0].amount, 500.0);
    assert_eq!(cash(&data), 500.0);
}

#[test]
fn cascade_that_would_overdraw_is_rejected_atomically() {
    let data = ObligationService::save_liability(
        &ProfileData::default(),
        ObligationDraft::new("Préstamo banco", 1000.0, day(1)).through(PaymentMethod::Cash),
    )
    .expect("borrowed");
    let data = TransactionService::add(
        &data,
        TransactionDraft::expense("Moto", 900.0, day(2), PaymentMethod::Cash),
    )
    .expect("spent");
    let creation = data
        .transactions
        .iter()
        .find(|txn| txn.linkage.is_creation())
        .expect("creation")
        .id;

    let err = TransactionService::delete(&data, creation).unwrap_err();
    assert!(err.is_insufficient_funds());
    assert_eq!(data.liabilities.len(), 1);
    assert_eq!(cash(&data), 100.0);
}

#[test]
fn deleting_a_repayment_that_was_spent_is_rejected() {
    let data = ObligationService::save_loan(
        &with_income(100.0),
        ObligationDraft::new("Ana", 100.0, day(2)).through(PaymentMethod::Cash),
    )
    .expect("lent");
    let loan_id = data.loans[0].id;
    let data = ObligationService::receive_loan_payments(
        &data,
        &[ObligationPayment::new(loan_id, 100.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("repaid");
    let repayment = data.transactions[0].id;
    let data = TransactionService::add(
        &data,
        TransactionDraft::expense("Cena", 100.0, day(4), PaymentMethod::Cash),
    )
    .expect("spent");

    assert!(TransactionService::delete(&data, repayment)
        .unwrap_err()
        .is_insufficient_funds());
    assert_eq!(data.loans[0].amount, 0.0);
}

#[test]
fn addition_transaction_is_reverted_on_delete() {
    let data = ObligationService::save_liability(
        &ProfileData::default(),
        ObligationDraft::new("Hipoteca", 1000.0, day(1)).through(PaymentMethod::Cash),
    )
    .expect("borrowed");
    let id = data.liabilities[0].id;
    let data = ObligationService::add_value_to_liability(
        &data,
        id,
        AdditionDraft::through(250.0, day(2), PaymentMethod::Cash),
    )
    .expect("added");
    assert_eq!(data.liabilities[0].original_amount, 1250.0);
    assert_eq!(cash(&data), 1250.0);
    assert_eq!(data.transactions[0].description, "Ampliación deuda: Hipoteca");

    let addition = data.transactions[0].id;
    let data = TransactionService::delete(&data, addition).expect("reverted");
    assert_eq!(data.liabilities[0].amount, 1000.0);
    assert_eq!(data.liabilities[0].original_amount, 1000.0);
}

#[test]
fn savings_are_consumed_oldest_first() {
    let data = with_income(200.0);
    let data = SavingsService::create_saving(
        &data,
        SavingDraft::new("Viejo", 50.0, day(2), PaymentMethod::Cash),
    )
    .expect("older");
    let data = SavingsService::create_saving(
        &data,
        SavingDraft::new("Nuevo", 80.0, day(3), PaymentMethod::Cash),
    )
    .expect("newer");
    assert_eq!(cash(&data), 70.0);

    let spent = SavingsService::spend_from_savings(
        &data,
        SpendDraft::new(60.0, "Vuelo", day(4), PaymentMethod::Cash),
    )
    .expect("spent");
    assert_eq!(spent.assets[0].value, 0.0);
    assert_eq!(spent.assets[1].value, 70.0);
    assert_eq!(cash(&spent), 70.0);

    let too_much = SavingsService::spend_from_savings(
        &spent,
        SpendDraft::new(71.0, "Hotel", day(5), PaymentMethod::Cash),
    )
    .unwrap_err();
    assert!(too_much.is_insufficient_funds());
    assert_eq!(spent.assets[1].value, 70.0);

    let expense = spent.transactions[0].id;
    let withdrawal = spent.transactions[1].id;
    let data = TransactionService::delete(&spent, expense).expect("expense removed");
    let data = TransactionService::delete(&data, withdrawal).expect("withdrawal removed");
    assert_eq!(data.assets[0].value, 50.0);
    assert_eq!(data.assets[1].value, 80.0);
    assert_eq!(cash(&data), 70.0);
}

#[test]
fn settled_liability_is_archived_keeping_payments() {
    let data = with_income(200.0);
    let data = ObligationService::save_liability(
        &data,
        ObligationDraft::new("Tarjeta", 100.0, day(2)),
    )
    .expect("initial debt");
    let id = data.liabilities[0].id;
    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 100.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("paid");

    let data = ObligationService::delete_liability(&data, id).expect("archived");
    assert!(data.liabilities.is_empty());
    let payment = &data.transactions[0];
    assert!(payment.linkage.is_none());
    assert_eq!(payment.details.as_deref(), Some("(Deuda archivada: Tarjeta)"));
    assert_eq!(cash(&data), 100.0);
}

#[test]
fn active_liability_is_deleted_with_its_transactions() {
    let data = ObligationService::save_liability(
        &with_income(500.0),
        ObligationDraft::new("Coche", 300.0, day(2)).through(PaymentMethod::Cash),
    )
    .expect("borrowed");
    let id = data.liabilities[0].id;
    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 100.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("paid");
    assert_eq!(cash(&data), 700.0);

    let data = ObligationService::delete_liability(&data, id).expect("deleted");
    assert!(data.liabilities.is_empty());
    assert_eq!(data.transactions.len(), 1);
    assert_eq!(cash(&data), 500.0);
}

#[test]
fn gifted_fixed_expense_is_paid_without_moving_money() {
    let data = ExpenseTemplateService::add_fixed(
        &with_income(50.0),
        TemplateDraft::new("Netflix", 12.0),
    )
    .expect("template");
    let expense_id = data.fixed_expenses[0].id;
    let data = TransactionService::gift_fixed_expense(&data, expense_id, day(5), None)
        .expect("gifted");

    let gift = &data.transactions[0];
    assert!(gift.is_gift);
    assert_eq!(gift.amount, 0.0);
    assert_eq!(gift.description, "Netflix");
    assert_eq!(
        gift.details.as_deref(),
        Some("Marcado como pagado manualmente (Sin restar saldo)")
    );
    assert_eq!(cash(&data), 50.0);

    let clock = FixedClock(day(20));
    let statuses = SummaryService::fixed_expense_statuses(&data, &clock);
    assert!(statuses[0].paid);
    assert_eq!(SummaryService::monthly_stats(&data, &clock).expenses, 0.0);
}

#[test]
fn unlinked_expense_with_template_name_counts_as_paid() {
    let data = ExpenseTemplateService::add_fixed(
        &with_income(100.0),
        TemplateDraft::new("Gimnasio", 30.0),
    )
    .expect("template");
    let data = ExpenseTemplateService::add_fixed(&data, TemplateDraft::new("Agua", 20.0))
        .expect("template");
    let data = TransactionService::add(
        &data,
        TransactionDraft::expense("Gimnasio", 30.0, day(4), PaymentMethod::Cash),
    )
    .expect("paid by name");

    let statuses = SummaryService::fixed_expense_statuses(&data, &FixedClock(day(28)));
    assert_eq!(statuses[0].name, "Agua");
    assert!(!statuses[0].paid);
    assert!(statuses[1].paid);
}

#[test]
fn unknown_payment_method_is_an_input_error() {
    let stranger = PaymentMethod::Bank(uuid::Uuid::new_v4());
    let err = TransactionService::add(
        &with_income(10.0),
        TransactionDraft::income("Bizum", 5.0, day(2), stranger),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::NotFound("Payment method", _)));
}

#[test]
fn accepted_operations_never_leave_negative_balances() {
    let (data, bank) = with_bank(&with_income(300.0));
    let mut snapshots = vec![data.clone()];

    let attempts: Vec<Box<Attempt>> = vec![
        Box::new(move |d: &ProfileData| {
            TransactionService::add_transfer(d, PaymentMethod::Cash, bank, 120.0, day(2))
        }),
        Box::new(move |d: &ProfileData| {
            TransactionService::add(d, TransactionDraft::expense("Luz", 130.0, day(3), bank))
        }),
        Box::new(|d: &ProfileData| {
            SavingsService::create_saving(
                d,
                SavingDraft::new("Colchón", 100.0, day(4), PaymentMethod::Cash),
            )
        }),
        Box::new(|d: &ProfileData| {
            ObligationService::save_loan(
                d,
                ObligationDraft::new("Luis", 150.0, day(5)).through(PaymentMethod::Cash),
            )
        }),
        Box::new(move |d: &ProfileData| {
            TransactionService::add(d, TransactionDraft::expense("Agua", 20.0, day(6), bank))
        }),
    ];

    let mut current = data;
    for attempt in attempts {
        if let Ok(next) = attempt(&current) {
            assert_no_negative_balances(&next);
            snapshots.push(next.clone());
            current = next;
        }
    }
    assert!(snapshots.len() >= 3);
    for snapshot in &snapshots {
        assert_no_negative_balances(snapshot);
    }
}

fn creation_of(data: &ProfileData, patrimony_id: uuid::Uuid) -> uuid::Uuid {
    data.transactions
        .iter()
        .find(|txn| txn.linkage.is_creation() && txn.linkage.patrimony_id() == Some(patrimony_id))
        .expect("creation transaction")
        .id
}

#[test]
fn spent_saving_cannot_be_removed() {
    let data = SavingsService::create_saving(
        &with_income(100.0),
        SavingDraft::new("Colchón", 50.0, day(2), PaymentMethod::Cash),
    )
    .expect("saved");
    let asset_id = data.assets[0].id;
    let data = SavingsService::spend_from_savings(
        &data,
        SpendDraft::new(50.0, "Vuelo", day(3), PaymentMethod::Cash),
    )
    .expect("spent");
    let net_worth = SummaryService::net_worth(&data).net_worth;
    assert_eq!(net_worth, 50.0);

    let creation = creation_of(&data, asset_id);
    let err = TransactionService::delete(&data, creation).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    let err = SavingsService::delete_asset(&data, asset_id).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    assert_eq!(SummaryService::net_worth(&data).net_worth, net_worth);
    assert_eq!(cash(&data), 50.0);

    // Undo the spending first, then the saving can go.
    let expense = data.transactions[0].id;
    let withdrawal = data.transactions[1].id;
    let data = TransactionService::delete(&data, expense).expect("expense removed");
    let data = TransactionService::delete(&data, withdrawal).expect("withdrawal removed");
    assert_eq!(data.assets[0].value, 50.0);
    let data = TransactionService::delete(&data, creation).expect("saving removed");
    assert!(data.assets.is_empty());
    assert_eq!(cash(&data), 100.0);
    assert_eq!(SummaryService::net_worth(&data).net_worth, 100.0);
}

#[test]
fn untouched_saving_is_removed_with_its_creation() {
    let data = SavingsService::create_saving(
        &with_income(100.0),
        SavingDraft::new("Vacaciones", 40.0, day(2), PaymentMethod::Cash),
    )
    .expect("saved");
    let data = SavingsService::create_saving(
        &data,
        SavingDraft::new("Coche", 25.0, day(3), PaymentMethod::Cash),
    )
    .expect("saved");
    assert_eq!(cash(&data), 35.0);
    let holidays = data.assets[0].id;
    let car = data.assets[1].id;

    let data = SavingsService::delete_asset(&data, holidays).expect("asset deleted");
    assert_eq!(data.assets.len(), 1);
    assert_eq!(cash(&data), 75.0);
    assert!(data
        .transactions
        .iter()
        .all(|txn| txn.linkage.patrimony_id() != Some(holidays)));

    let creation = creation_of(&data, car);
    let data = TransactionService::delete(&data, creation).expect("creation deleted");
    assert!(data.assets.is_empty());
    assert_eq!(data.transactions.len(), 1);
    assert_eq!(cash(&data), 100.0);

    assert!(matches!(
        SavingsService::delete_asset(&data, car),
        Err(CoreError::NotFound("Asset", _))
    ));
}

#[test]
fn withdrawal_of_a_missing_asset_is_deleted_cleanly() {
    let mut data = with_income(100.0);
    let orphan = SavingsDraw {
        asset_id: uuid::Uuid::new_v4(),
        amount: 30.0,
    };
    data.transactions.insert(
        0,
        Transaction::income("Retiro de ahorros", 30.0, day(2), PaymentMethod::Cash).with_linkage(
            Linkage::SavingsWithdrawal {
                source: PaymentMethod::Cash,
                draws: vec![orphan],
            },
        ),
    );
    let withdrawal = data.transactions[0].id;

    let data = TransactionService::delete(&data, withdrawal).expect("withdrawal removed");
    assert!(data.assets.is_empty());
    assert_eq!(data.transactions.len(), 1);
    assert_eq!(cash(&data), 100.0);
}

#[test]
fn reverting_an_addition_cannot_leave_a_negative_debt() {
    let data = ObligationService::save_liability(
        &with_income(1000.0),
        ObligationDraft::new("Hipoteca", 100.0, day(1)),
    )
    .expect("recorded");
    let id = data.liabilities[0].id;
    let data = ObligationService::add_value_to_liability(
        &data,
        id,
        AdditionDraft::through(200.0, day(2), PaymentMethod::Cash),
    )
    .expect("added");
    let addition = data.transactions[0].id;
    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 300.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("paid off");
    assert_eq!(data.liabilities[0].amount, 0.0);

    let err = TransactionService::delete(&data, addition).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    assert_eq!(data.liabilities[0].amount, 0.0);
    assert_eq!(data.liabilities[0].original_amount, 300.0);
    assert_eq!(SummaryService::net_worth(&data).net_worth, 900.0);
}

#[test]
fn shrinking_an_initial_addition_below_what_was_paid_is_rejected() {
    let data = ObligationService::save_liability(
        &with_income(1000.0),
        ObligationDraft::new("Coche", 100.0, day(1)),
    )
    .expect("recorded");
    let id = data.liabilities[0].id;
    let data = ObligationService::add_value_to_liability(
        &data,
        id,
        AdditionDraft::initial(200.0, day(2)),
    )
    .expect("added");
    let addition_id = data.liabilities[0].initial_additions[0].id;
    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 250.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("paid");
    assert_eq!(data.liabilities[0].amount, 50.0);

    let err = ObligationService::update_liability_addition(&data, id, addition_id, 100.0)
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    assert_eq!(data.liabilities[0].initial_additions[0].amount, 200.0);

    let data = ObligationService::update_liability_addition(&data, id, addition_id, 160.0)
        .expect("still covered");
    let liability = &data.liabilities[0];
    assert!((liability.amount - 10.0).abs() < BALANCE_EPSILON);
    assert_eq!(liability.original_amount, 260.0);
}

#[test]
fn loan_is_edited_enlarged_and_deleted() {
    let data = ObligationService::save_loan(
        &with_income(500.0),
        ObligationDraft::new("Ana", 200.0, day(2)).through(PaymentMethod::Cash),
    )
    .expect("lent");
    let loan_id = data.loans[0].id;
    let data = ObligationService::receive_loan_payments(
        &data,
        &[ObligationPayment::new(loan_id, 50.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("repaid");
    assert_eq!(cash(&data), 350.0);

    let err = ObligationService::update_loan(
        &data,
        loan_id,
        ObligationEdit {
            name: "Ana".into(),
            details: String::new(),
            original_amount: 40.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));

    let data = ObligationService::update_loan(
        &data,
        loan_id,
        ObligationEdit {
            name: "Ana García".into(),
            details: "piso".into(),
            original_amount: 300.0,
        },
    )
    .expect("edited");
    assert_eq!(data.loans[0].name, "Ana García");
    assert_eq!(data.loans[0].amount, 250.0);
    assert_eq!(data.loans[0].original_amount, 300.0);

    let data = ObligationService::add_value_to_loan(
        &data,
        loan_id,
        AdditionDraft::through(100.0, day(4), PaymentMethod::Cash),
    )
    .expect("lent more");
    assert_eq!(cash(&data), 250.0);
    assert_eq!(data.loans[0].amount, 350.0);
    assert_eq!(data.loans[0].original_amount, 400.0);
    assert_eq!(data.transactions[0].description, "Ampliación préstamo: Ana García");

    let too_much = ObligationService::add_value_to_loan(
        &data,
        loan_id,
        AdditionDraft::through(300.0, day(5), PaymentMethod::Cash),
    )
    .unwrap_err();
    assert!(too_much.is_insufficient_funds());

    let data = ObligationService::delete_loan(&data, loan_id).expect("deleted");
    assert!(data.loans.is_empty());
    assert_eq!(data.transactions.len(), 1);
    assert_eq!(cash(&data), 500.0);
}

#[test]
fn deleting_a_loan_creation_removes_the_loan() {
    let data = ObligationService::save_loan(
        &with_income(300.0),
        ObligationDraft::new("Luis", 120.0, day(2)).through(PaymentMethod::Cash),
    )
    .expect("lent");
    let loan_id = data.loans[0].id;
    let data = ObligationService::receive_loan_payments(
        &data,
        &[ObligationPayment::new(loan_id, 20.0)],
        PaymentMethod::Cash,
        day(3),
    )
    .expect("repaid");

    let creation = creation_of(&data, loan_id);
    let prompt = TransactionService::deletion_prompt(&data, creation).expect("prompt");
    assert!(prompt.contains("Luis"));
    let data = TransactionService::delete(&data, creation).expect("deleted");
    assert!(data.loans.is_empty());
    assert_eq!(data.transactions.len(), 1);
    assert_eq!(cash(&data), 300.0);
}

#[test]
fn liability_original_cannot_drop_below_what_was_paid() {
    let data = ObligationService::save_liability(
        &ProfileData::default(),
        ObligationDraft::new("Tarjeta", 500.0, day(1)).through(PaymentMethod::Cash),
    )
    .expect("borrowed");
    let id = data.liabilities[0].id;
    let data = ObligationService::pay_debts(
        &data,
        &[ObligationPayment::new(id, 300.0)],
        PaymentMethod::Cash,
        day(2),
    )
    .expect("paid");

    let err = ObligationService::update_liability(
        &data,
        id,
        ObligationEdit {
            name: "Tarjeta".into(),
            details: String::new(),
            original_amount: 250.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));
    assert_eq!(data.liabilities[0].original_amount, 500.0);
}
