mod common;

use pocket_ledger::{
    engine::{
        ExpenseTemplateService, SavingDraft, SavingsService, TemplateDraft, TransactionDraft,
        TransactionService,
    },
    domain::PaymentMethod,
    report::Overview,
};

use common::{day, setup_test_env};

#[test]
fn overview_reflects_session_state() {
    colored::control::set_override(false);
    let (mut session, _config, _base) = setup_test_env();
    session.create_profile("Casa", "ES", "EUR").expect("create");
    session
        .apply(|data| {
            TransactionService::add(
                data,
                TransactionDraft::income("Nómina", 1000.0, day(1), PaymentMethod::Cash),
            )
        })
        .expect("income");
    session
        .apply(|data| {
            ExpenseTemplateService::add_fixed(data, TemplateDraft::new("Alquiler", 600.0))
        })
        .expect("fixed");
    session
        .apply(|data| ExpenseTemplateService::add_fixed(data, TemplateDraft::new("Luz", 40.0)))
        .expect("fixed");
    let rent = session.active_data().expect("data").fixed_expenses[0].id;
    session
        .apply(|data| {
            TransactionService::pay_fixed_expense(data, rent, PaymentMethod::Cash, day(2))
        })
        .expect("pay rent");
    session
        .apply(|data| {
            SavingsService::create_saving(
                data,
                SavingDraft::new("Colchón", 100.0, day(3), PaymentMethod::Cash),
            )
        })
        .expect("saving");

    let profile = session.active().expect("active");
    let overview = Overview::build(profile, session.clock());

    assert_eq!(overview.balances[0].balance, 300.0);
    assert_eq!(overview.month_income, 1000.0);
    assert_eq!(overview.month_expenses, 600.0);
    assert_eq!(overview.fixed_expenses[0].name, "Luz");
    assert!(!overview.fixed_expenses[0].paid);
    assert!(overview.fixed_expenses[1].paid);
    assert_eq!(overview.savings[0].balance, 100.0);
    assert_eq!(overview.net_worth, 400.0);

    let text = overview.render();
    assert!(text.contains("[ ] Luz"));
    assert!(text.contains("Patrimonio neto: 400.00 EUR"));
}
