//! Per-payment-method running balances derived from the transaction log.

use std::collections::BTreeMap;

use pocket_domain::{BankAccount, PaymentMethod, Transaction};

/// Balance of every payment method, keyed by method.
pub type Balances = BTreeMap<PaymentMethod, f64>;

/// Folds `transactions` in chronological order into per-method balances.
///
/// Cash and every known bank account start at zero; transactions referencing
/// an unknown method still get an entry. Gifts are skipped.
pub fn compute_balances(transactions: &[Transaction], bank_accounts: &[BankAccount]) -> Balances {
    let mut balances = Balances::new();
    balances.insert(PaymentMethod::Cash, 0.0);
    for account in bank_accounts {
        balances.insert(account.method(), 0.0);
    }

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|txn| txn.date);

    for txn in ordered.into_iter().filter(|txn| !txn.is_gift) {
        *balances.entry(txn.payment_method).or_insert(0.0) += txn.signed_amount();
    }
    balances
}

/// Sum of every per-method balance.
pub fn total_balance(balances: &Balances) -> f64 {
    balances.values().sum()
}

/// Balance for `method`, zero when the method has never been seen.
pub fn balance_of(balances: &Balances, method: PaymentMethod) -> f64 {
    balances.get(&method).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn initialises_every_known_method() {
        let bank = BankAccount::new("BBVA", "#004481");
        let balances = compute_balances(&[], std::slice::from_ref(&bank));
        assert_eq!(balances.len(), 2);
        assert_eq!(balance_of(&balances, PaymentMethod::Cash), 0.0);
        assert_eq!(balance_of(&balances, bank.method()), 0.0);
    }

    #[test]
    fn folds_income_and_expense_skipping_gifts() {
        let bank = BankAccount::new("BBVA", "#004481");
        let mut gift = Transaction::expense("Luz", 30.0, day(3), PaymentMethod::Cash);
        gift.is_gift = true;
        let txns = vec![
            Transaction::expense("Pan", 20.0, day(2), PaymentMethod::Cash),
            Transaction::income("Nómina", 100.0, day(1), PaymentMethod::Cash),
            Transaction::income("Bizum", 15.0, day(2), bank.method()),
            gift,
        ];

        let balances = compute_balances(&txns, std::slice::from_ref(&bank));
        assert_eq!(balance_of(&balances, PaymentMethod::Cash), 80.0);
        assert_eq!(balance_of(&balances, bank.method()), 15.0);
        assert_eq!(total_balance(&balances), 95.0);
    }

    #[test]
    fn unknown_methods_get_their_own_entry() {
        let orphan = PaymentMethod::Bank(uuid::Uuid::new_v4());
        let txns = vec![Transaction::income("Regalo", 10.0, day(1), orphan)];
        let balances = compute_balances(&txns, &[]);
        assert_eq!(balance_of(&balances, orphan), 10.0);
    }
}
