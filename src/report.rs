//! Read-only overview of the active profile, as coloured text or JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use pocket_core::{compute_balances, Clock, ObligationProgress, SummaryService};
use pocket_domain::Profile;

use crate::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MethodLine {
    pub label: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FixedLine {
    pub name: String,
    pub amount: f64,
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressLine {
    pub name: String,
    pub outstanding: f64,
    pub original: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overview {
    pub profile: String,
    pub currency: String,
    pub balances: Vec<MethodLine>,
    pub month_income: f64,
    pub month_expenses: f64,
    pub fixed_expenses: Vec<FixedLine>,
    pub savings: Vec<MethodLine>,
    pub liabilities: Vec<ProgressLine>,
    pub loans: Vec<ProgressLine>,
    pub net_worth: f64,
}

impl Overview {
    pub fn build(profile: &Profile, clock: &dyn Clock) -> Self {
        let data = &profile.data;
        let balances = compute_balances(&data.transactions, &data.bank_accounts);
        let month = SummaryService::monthly_stats(data, clock);
        let progress = |rows: Vec<ObligationProgress>| -> Vec<ProgressLine> {
            rows.into_iter()
                .map(|row| ProgressLine {
                    name: row.name,
                    outstanding: row.outstanding,
                    original: row.original_amount,
                    percent: row.percent,
                })
                .collect()
        };

        Self {
            profile: profile.name.clone(),
            currency: profile.currency.clone(),
            balances: balances
                .iter()
                .map(|(method, balance)| MethodLine {
                    label: data.method_label(*method),
                    balance: *balance,
                })
                .collect(),
            month_income: month.income,
            month_expenses: month.expenses,
            fixed_expenses: SummaryService::fixed_expense_statuses(data, clock)
                .into_iter()
                .map(|status| FixedLine {
                    name: status.name,
                    amount: status.amount,
                    paid: status.paid,
                })
                .collect(),
            savings: SummaryService::savings_by_source(data)
                .into_iter()
                .map(|row| MethodLine {
                    label: row.name,
                    balance: row.total,
                })
                .collect(),
            liabilities: progress(SummaryService::liability_progress(data)),
            loans: progress(SummaryService::loan_progress(data)),
            net_worth: SummaryService::net_worth(data).net_worth,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let money = |value: f64| format!("{:.2} {}", value, self.currency);

        let _ = writeln!(out, "{}", format!("== {} ==", self.profile).bold());
        section(&mut out, "Saldos");
        for line in &self.balances {
            let amount = money(line.balance);
            let amount = if line.balance < 0.0 {
                amount.red()
            } else {
                amount.normal()
            };
            let _ = writeln!(out, "  {:<24} {}", line.label, amount);
        }

        section(&mut out, "Este mes");
        let _ = writeln!(out, "  {:<24} {}", "Ingresos", money(self.month_income).green());
        let _ = writeln!(out, "  {:<24} {}", "Gastos", money(self.month_expenses).red());

        if !self.fixed_expenses.is_empty() {
            section(&mut out, "Gastos fijos");
            for line in &self.fixed_expenses {
                let mark = if line.paid { "[x]".green() } else { "[ ]".yellow() };
                let _ = writeln!(out, "  {} {:<20} {}", mark, line.name, money(line.amount));
            }
        }

        if !self.savings.is_empty() {
            section(&mut out, "Ahorros");
            for line in &self.savings {
                let _ = writeln!(out, "  {:<24} {}", line.label, money(line.balance));
            }
        }

        for (title, rows) in [("Deudas", &self.liabilities), ("Préstamos", &self.loans)] {
            if rows.is_empty() {
                continue;
            }
            section(&mut out, title);
            for row in rows {
                let _ = writeln!(
                    out,
                    "  {:<24} {} / {} ({:.0}%)",
                    row.name,
                    money(row.outstanding),
                    money(row.original),
                    row.percent
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", "Patrimonio neto:".bold(), money(self.net_worth));
        out
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title.cyan().bold());
}
