//! Derived statistics: income/expense summaries, fixed-expense status,
//! savings breakdowns and net worth.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use pocket_domain::{
    FixedExpense, Obligation, PaymentMethod, ProfileData, Transaction, TransactionType,
};

use crate::{
    balance::{compute_balances, total_balance},
    time::Clock,
};

/// Income and expense totals split by cash and bank.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodStats {
    pub income: f64,
    pub expenses: f64,
    pub income_cash: f64,
    pub income_bank: f64,
    pub expenses_cash: f64,
    pub expenses_bank: f64,
}

impl PeriodStats {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }

    fn record(&mut self, txn: &Transaction) {
        let cash = txn.payment_method.is_cash();
        match txn.kind {
            TransactionType::Income => {
                self.income += txn.amount;
                if cash {
                    self.income_cash += txn.amount;
                } else {
                    self.income_bank += txn.amount;
                }
            }
            TransactionType::Expense => {
                self.expenses += txn.amount;
                if cash {
                    self.expenses_cash += txn.amount;
                } else {
                    self.expenses_bank += txn.amount;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpenseStatus {
    pub expense_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub paid: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedExpenseTotals {
    pub total: f64,
    pub paid: f64,
    pub remaining: f64,
}

/// Current saved value grouped by the method it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsBySource {
    pub method: PaymentMethod,
    pub name: String,
    pub color: Option<String>,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetWorth {
    pub liquid: f64,
    pub assets: f64,
    pub liabilities: f64,
    pub loans: f64,
    pub net_worth: f64,
}

/// Repayment progress of a liability or loan.
#[derive(Debug, Clone, PartialEq)]
pub struct ObligationProgress {
    pub id: Uuid,
    pub name: String,
    pub original_amount: f64,
    pub outstanding: f64,
    pub paid: f64,
    pub percent: f64,
    pub settled: bool,
}

impl ObligationProgress {
    fn of<T: Obligation>(entry: &T) -> Self {
        Self {
            id: entry.id(),
            name: entry.name().to_string(),
            original_amount: entry.original_amount(),
            outstanding: entry.amount(),
            paid: entry.paid_amount(),
            percent: entry.progress_percent(),
            settled: entry.is_settled(),
        }
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Real income and spending in the calendar month containing `clock.today()`.
    pub fn monthly_stats(data: &ProfileData, clock: &dyn Clock) -> PeriodStats {
        let today = clock.today();
        Self::stats_where(data, |txn| same_month(txn.date, today))
    }

    /// Real income and spending across the whole history.
    pub fn total_stats(data: &ProfileData) -> PeriodStats {
        Self::stats_where(data, |_| true)
    }

    /// A fixed expense counts as paid when an expense this month is linked to
    /// it, or, for unlinked expenses, carries exactly its name.
    pub fn is_fixed_expense_paid(
        data: &ProfileData,
        expense: &FixedExpense,
        clock: &dyn Clock,
    ) -> bool {
        let today = clock.today();
        data.transactions
            .iter()
            .filter(|txn| txn.is_expense() && same_month(txn.date, today))
            .any(|txn| match txn.fixed_expense_id {
                Some(linked) => linked == expense.id,
                None => txn.description == expense.name,
            })
    }

    /// Every fixed expense with its paid flag, unpaid first then by name.
    pub fn fixed_expense_statuses(data: &ProfileData, clock: &dyn Clock) -> Vec<FixedExpenseStatus> {
        let mut statuses: Vec<FixedExpenseStatus> = data
            .fixed_expenses
            .iter()
            .map(|expense| FixedExpenseStatus {
                expense_id: expense.id,
                name: expense.name.clone(),
                amount: expense.amount,
                paid: Self::is_fixed_expense_paid(data, expense, clock),
            })
            .collect();
        statuses.sort_by(|a, b| {
            a.paid
                .cmp(&b.paid)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        statuses
    }

    pub fn fixed_expense_totals(data: &ProfileData, clock: &dyn Clock) -> FixedExpenseTotals {
        let statuses = Self::fixed_expense_statuses(data, clock);
        let total: f64 = statuses.iter().map(|status| status.amount).sum();
        let paid: f64 = statuses
            .iter()
            .filter(|status| status.paid)
            .map(|status| status.amount)
            .sum();
        FixedExpenseTotals {
            total,
            paid,
            remaining: total - paid,
        }
    }

    /// Saved value per source method, in payment-method order.
    pub fn savings_by_source(data: &ProfileData) -> Vec<SavingsBySource> {
        let mut methods = data.payment_methods();
        for asset in &data.assets {
            if !methods.contains(&asset.source_method) {
                methods.push(asset.source_method);
            }
        }
        methods
            .into_iter()
            .filter_map(|method| {
                let sources: Vec<f64> = data
                    .assets
                    .iter()
                    .filter(|asset| asset.source_method == method)
                    .map(|asset| asset.value)
                    .collect();
                if sources.is_empty() {
                    return None;
                }
                Some(SavingsBySource {
                    method,
                    name: data.method_label(method),
                    color: data.method_color(method),
                    total: sources.iter().sum(),
                })
            })
            .collect()
    }

    pub fn net_worth(data: &ProfileData) -> NetWorth {
        let liquid = total_balance(&compute_balances(&data.transactions, &data.bank_accounts));
        let assets: f64 = data.assets.iter().map(|asset| asset.value).sum();
        let liabilities: f64 = data.liabilities.iter().map(|entry| entry.amount).sum();
        let loans: f64 = data.loans.iter().map(|entry| entry.amount).sum();
        NetWorth {
            liquid,
            assets,
            liabilities,
            loans,
            net_worth: liquid + assets + loans - liabilities,
        }
    }

    /// Liabilities ordered with the least-paid first.
    pub fn liability_progress(data: &ProfileData) -> Vec<ObligationProgress> {
        let mut rows: Vec<_> = data.liabilities.iter().map(ObligationProgress::of).collect();
        rows.sort_by(|a, b| a.percent.partial_cmp(&b.percent).unwrap_or(Ordering::Equal));
        rows
    }

    pub fn loan_progress(data: &ProfileData) -> Vec<ObligationProgress> {
        let mut rows: Vec<_> = data.loans.iter().map(ObligationProgress::of).collect();
        rows.sort_by(|a, b| a.percent.partial_cmp(&b.percent).unwrap_or(Ordering::Equal));
        rows
    }

    fn stats_where(data: &ProfileData, keep: impl Fn(&Transaction) -> bool) -> PeriodStats {
        let mut stats = PeriodStats::default();
        for txn in data
            .transactions
            .iter()
            .filter(|txn| !txn.is_internal_movement() && keep(txn))
        {
            stats.record(txn);
        }
        stats
    }
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

#[cfg(test)]
mod tests {
    use pocket_domain::{Asset, Linkage, Transaction};

    use super::*;
    use crate::time::FixedClock;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn internal_movements_are_excluded() {
        let mut data = ProfileData::default();
        let transfer = Linkage::Transfer {
            transfer_id: Uuid::new_v4(),
        };
        data.transactions = vec![
            Transaction::income("Nómina", 1000.0, day(5, 1), PaymentMethod::Cash),
            Transaction::expense("Súper", 80.0, day(5, 3), PaymentMethod::Cash),
            Transaction::expense("Transfer", 50.0, day(5, 4), PaymentMethod::Cash)
                .with_linkage(transfer.clone()),
            Transaction::expense("Abril", 20.0, day(4, 30), PaymentMethod::Cash),
        ];

        let month = SummaryService::monthly_stats(&data, &FixedClock(day(5, 20)));
        assert_eq!(month.income, 1000.0);
        assert_eq!(month.expenses, 80.0);
        assert_eq!(month.expenses_cash, 80.0);
        assert_eq!(month.net(), 920.0);

        let total = SummaryService::total_stats(&data);
        assert_eq!(total.expenses, 100.0);
    }

    #[test]
    fn savings_grouped_by_source_with_cash_colour() {
        let mut data = ProfileData::default();
        data.assets = vec![
            Asset::new("A", 50.0, day(1, 1), PaymentMethod::Cash),
            Asset::new("B", 25.0, day(1, 2), PaymentMethod::Cash),
        ];
        let rows = SummaryService::savings_by_source(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, 75.0);
        assert_eq!(rows[0].name, pocket_domain::CASH_METHOD_NAME);
        assert_eq!(rows[0].color.as_deref(), Some(pocket_domain::CASH_METHOD_COLOR));
    }
}
