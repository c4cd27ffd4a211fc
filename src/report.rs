//! Renders a [`LoanCalculation`] for people (aligned text) or for other
//! programs (JSON).

use std::fmt::{self, Write};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::Result;
use crate::loan::LoanCalculation;

/// A labelled currency figure shown in the payment details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: Decimal,
}

impl Metric {
    fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self { label: label.into(), value }
    }
}

/// Rounds to cents, half away from zero.
pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a dollar amount with thousands separators, e.g. `$12,345.68`.
///
/// Negative amounts keep the sign after the dollar sign: `$-1,250.00`.
pub fn format_currency(value: Decimal) -> String {
    let cents = round_to_cents(value);
    let digits = format!("{:.2}", cents.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if cents.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    format!("${sign}{grouped}.{fraction}")
}

/// The payment details in display order.
pub fn metrics(calc: &LoanCalculation) -> Vec<Metric> {
    let result = &calc.result;
    vec![
        Metric::new("Total Loan Amount", result.total_loan_amount),
        Metric::new(
            format!("Total of {} Loan Payments", calc.inputs.loan_term),
            result.total_loan_payments,
        ),
        Metric::new("Total Loan Interest", result.total_loan_interest),
        Metric::new("Upfront Payment", result.upfront_payment),
        Metric::new("Sales Tax", result.tax_paid),
        Metric::new("Monthly Payment", result.monthly_payment),
        Metric::new("Total Cost (price, interest, tax, fees)", result.total_cost),
    ]
}

/// Renders the payment details, the interest/principal breakdown and,
/// when `include_schedule` is set, the month-by-month schedule.
pub fn render_text(calc: &LoanCalculation, include_schedule: bool) -> String {
    let mut out = String::new();
    let _ = write_text(&mut out, calc, include_schedule);
    out
}

fn write_text(out: &mut String, calc: &LoanCalculation, include_schedule: bool) -> fmt::Result {
    writeln!(out, "Car Loan Calculator")?;
    writeln!(out)?;
    writeln!(out, "Loan & Payment Details")?;
    let metrics = metrics(calc);
    let width = metrics.iter().map(|m| m.label.len()).max().unwrap_or(0);
    for metric in &metrics {
        writeln!(out, "  {:<width$}  {:>14}", metric.label, format_currency(metric.value))?;
    }

    writeln!(out)?;
    writeln!(out, "Loan Breakdown")?;
    match calc.result.breakdown() {
        Some(breakdown) => {
            writeln!(out, "  {:<9}  {:>5.1}%", "Interest", breakdown.interest_percent.round_dp(1))?;
            writeln!(out, "  {:<9}  {:>5.1}%", "Principle", breakdown.principal_percent.round_dp(1))?;
        }
        None => writeln!(out, "  nothing financed")?,
    }

    if include_schedule {
        writeln!(out)?;
        writeln!(out, "Payment Schedule")?;
        writeln!(out, "  {:>5}  {:>14}  {:>14}", "Month", "Interest", "Principle")?;
        for entry in &calc.schedule {
            writeln!(
                out,
                "  {:>5}  {:>14}  {:>14}",
                entry.period_index,
                format_currency(entry.interest_portion),
                format_currency(entry.principal_portion)
            )?;
        }
    }

    Ok(())
}

/// Serializes the whole calculation (inputs, totals, schedule) as pretty JSON.
pub fn render_json(calc: &LoanCalculation) -> Result<String> {
    Ok(serde_json::to_string_pretty(calc)?)
}
