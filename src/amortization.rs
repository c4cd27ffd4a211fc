//! Fixed-payment amortization: the periodic payment and the month-by-month
//! split of each payment into interest and principal.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LoanError, Result};

/// Payment periods in a year.
pub const PERIODS_PER_YEAR: u32 = 12;

/// One payment period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based index of the payment period.
    pub period_index: u32,
    /// The portion of the payment that covers interest.
    pub interest_portion: Decimal,
    /// The portion of the payment that reduces the balance.
    pub principal_portion: Decimal,
}

/// Converts an annual percentage rate into the per-period fraction.
///
/// The annual rate is split evenly across the months (5% a year becomes
/// `0.05 / 12` per month), it is not compounded.
pub fn periodic_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(100) / Decimal::from(PERIODS_PER_YEAR)
}

/// Calculates the fixed periodic payment that pays off `principal` in
/// `num_periods` payments.
///
/// The formula is: PMT = P * [r(1 + r)^n] / [(1 + r)^n - 1]
///
/// A zero `periodic_rate` would divide by zero, so it is treated as an
/// interest-free loan and the principal is split evenly.
///
/// # Errors
///
/// Returns [`LoanError::ZeroPeriods`] if `num_periods` is zero and
/// [`LoanError::Arithmetic`] if `(1 + r)^n` or the payment overflows.
pub fn amortization_calculation(principal: Decimal, periodic_rate: Decimal, num_periods: u32) -> Result<Decimal> {
    if num_periods == 0 {
        return Err(LoanError::ZeroPeriods);
    }

    let periods = Decimal::from(num_periods);
    if periodic_rate.is_zero() {
        warn!(%principal, num_periods, "zero interest rate, splitting principal evenly");
        return Ok(principal / periods);
    }

    let growth = (Decimal::ONE + periodic_rate)
        .checked_powu(num_periods.into())
        .ok_or_else(|| LoanError::arithmetic("compounding"))?;

    periodic_rate
        .checked_mul(growth)
        .and_then(|factor| principal.checked_mul(factor))
        .ok_or_else(|| LoanError::arithmetic("payment"))?
        .checked_div(growth - Decimal::ONE)
        .ok_or_else(|| LoanError::arithmetic("payment division"))
}

/// Walks the balance down one payment at a time.
///
/// Each period charges interest on the running balance and applies the rest
/// of `payment` to principal. No correction is applied to the last period,
/// so the final balance carries whatever rounding drift accumulated.
///
/// # Errors
///
/// Returns [`LoanError::Arithmetic`] if a period's interest or the running
/// balance overflows.
pub fn build_schedule(
    principal: Decimal,
    periodic_rate: Decimal,
    payment: Decimal,
    num_periods: u32,
) -> Result<Vec<ScheduleEntry>> {
    let mut balance = principal;
    let mut schedule = Vec::with_capacity(num_periods as usize);

    for period_index in 1..=num_periods {
        let interest_portion = balance
            .checked_mul(periodic_rate)
            .ok_or_else(|| LoanError::arithmetic("period interest"))?;
        let principal_portion = payment
            .checked_sub(interest_portion)
            .ok_or_else(|| LoanError::arithmetic("period principal"))?;
        balance = balance
            .checked_sub(principal_portion)
            .ok_or_else(|| LoanError::arithmetic("running balance"))?;
        schedule.push(ScheduleEntry {
            period_index,
            interest_portion,
            principal_portion,
        });
    }

    Ok(schedule)
}
