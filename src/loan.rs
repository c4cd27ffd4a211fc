//! Loan inputs, the financed-versus-upfront fee policy, and the full
//! calculation that ties tax, payment and schedule together.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::amortization::{ScheduleEntry, amortization_calculation, build_schedule, periodic_rate};
use crate::error::{LoanError, Result};
use crate::tax::calculate_total_tax_paid;

pub const MIN_AUTO_PRICE: Decimal = dec!(1.0);
pub const MIN_LOAN_TERM: u32 = 1;
pub const MIN_INTEREST_RATE: Decimal = dec!(0.01);
pub const MIN_SALES_TAX_RATE: Decimal = dec!(0.01);

/// Everything the buyer enters about the purchase and the loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Sticker price of the car.
    pub auto_price: Decimal,
    /// Number of monthly payments.
    pub loan_term: u32,
    /// Annual interest rate as a percentage (e.g., 5.0 for 5%).
    pub interest_rate: Decimal,
    /// Cash put toward the price at signing.
    pub down_payment: Decimal,
    /// Value credited for the buyer's current car.
    pub trade_in: Decimal,
    /// Sales tax rate as a percentage (e.g., 6.875 for 6.875%).
    pub sales_tax_rate: Decimal,
    /// Title, registration, and other fees.
    pub fees: Decimal,
    /// Roll tax and fees into the loan instead of paying them at signing.
    pub include_fees: bool,
}

impl Default for LoanInputs {
    fn default() -> Self {
        Self {
            auto_price: dec!(10000.00),
            loan_term: 60,
            interest_rate: dec!(5.0),
            down_payment: dec!(2500.00),
            trade_in: dec!(0.00),
            sales_tax_rate: dec!(6.875),
            fees: dec!(0.00),
            include_fees: false,
        }
    }
}

/// Where sales tax and fees are paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeePolicy {
    /// Tax and fees are due at signing with the down payment.
    PaidUpfront,
    /// Tax and fees are added to the amount borrowed.
    Financed,
}

impl From<bool> for FeePolicy {
    fn from(include_fees: bool) -> Self {
        if include_fees { FeePolicy::Financed } else { FeePolicy::PaidUpfront }
    }
}

fn checked_sum(operation: &'static str, terms: &[Decimal]) -> Result<Decimal> {
    terms
        .iter()
        .try_fold(Decimal::ZERO, |total, term| total.checked_add(*term))
        .ok_or_else(|| LoanError::arithmetic(operation))
}

fn check_minimum(field: &'static str, value: Decimal, minimum: Decimal) -> Result<()> {
    if value < minimum {
        return Err(LoanError::InvalidInput {
            field,
            value: value.to_string(),
            reason: format!("must be at least {minimum}"),
        });
    }
    Ok(())
}

impl LoanInputs {
    pub fn fee_policy(&self) -> FeePolicy {
        FeePolicy::from(self.include_fees)
    }

    /// Checks every field against the minimum the entry form accepts.
    ///
    /// Only lower bounds are enforced. A trade-in worth more than the car is
    /// accepted and produces a negative tax and loan amount downstream.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidInput`] for the first field below its minimum.
    pub fn validate(&self) -> Result<()> {
        check_minimum("auto_price", self.auto_price, MIN_AUTO_PRICE)?;
        if self.loan_term < MIN_LOAN_TERM {
            return Err(LoanError::InvalidInput {
                field: "loan_term",
                value: self.loan_term.to_string(),
                reason: format!("must be at least {MIN_LOAN_TERM}"),
            });
        }
        check_minimum("interest_rate", self.interest_rate, MIN_INTEREST_RATE)?;
        check_minimum("down_payment", self.down_payment, Decimal::ZERO)?;
        check_minimum("trade_in", self.trade_in, Decimal::ZERO)?;
        check_minimum("sales_tax_rate", self.sales_tax_rate, MIN_SALES_TAX_RATE)?;
        check_minimum("fees", self.fees, Decimal::ZERO)?;

        if self.trade_in > self.auto_price {
            warn!(
                trade_in = %self.trade_in,
                auto_price = %self.auto_price,
                "trade-in exceeds auto price, tax and loan amount will be negative"
            );
        }
        Ok(())
    }
}

/// Totals derived from a set of [`LoanInputs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Amount borrowed.
    pub total_loan_amount: Decimal,
    /// The fixed payment due each month.
    pub monthly_payment: Decimal,
    /// Sum of all monthly payments.
    pub total_loan_payments: Decimal,
    /// Interest paid over the life of the loan.
    pub total_loan_interest: Decimal,
    /// Sales tax owed on the purchase.
    pub tax_paid: Decimal,
    /// Cash due at signing.
    pub upfront_payment: Decimal,
    /// Price, interest, tax and fees together.
    pub total_cost: Decimal,
}

/// Interest and principal as percentage shares of everything repaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBreakdown {
    /// Interest as a percentage of all payments.
    pub interest_percent: Decimal,
    /// Amount borrowed as a percentage of all payments.
    pub principal_percent: Decimal,
}

impl LoanResult {
    /// Splits the repaid total into interest and principal shares.
    ///
    /// Returns `None` when interest and principal sum to zero or a share
    /// cannot be represented.
    pub fn breakdown(&self) -> Option<LoanBreakdown> {
        let whole = self.total_loan_interest.checked_add(self.total_loan_amount)?;
        let share = |part: Decimal| part.checked_div(whole)?.checked_mul(dec!(100));
        Some(LoanBreakdown {
            interest_percent: share(self.total_loan_interest)?,
            principal_percent: share(self.total_loan_amount)?,
        })
    }
}

/// A finished calculation: the inputs it was run on, the totals, and the
/// payment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub inputs: LoanInputs,
    pub result: LoanResult,
    pub schedule: Vec<ScheduleEntry>,
}

impl LoanCalculation {
    pub fn total_scheduled_interest(&self) -> Decimal {
        self.schedule.iter().map(|e| e.interest_portion).sum()
    }

    pub fn total_scheduled_principal(&self) -> Decimal {
        self.schedule.iter().map(|e| e.principal_portion).sum()
    }

    /// Balance left after the last scheduled payment. Close to zero, not exact.
    pub fn final_balance(&self) -> Decimal {
        self.result.total_loan_amount - self.total_scheduled_principal()
    }
}

/// Computes the loan totals and payment schedule for `inputs`.
///
/// Inputs are expected to have passed [`LoanInputs::validate`]; nothing is
/// re-checked here.
///
/// # Errors
///
/// Returns [`LoanError::ZeroPeriods`] for a zero loan term and
/// [`LoanError::Arithmetic`] if any amount overflows.
pub fn calculate_loan(inputs: &LoanInputs) -> Result<LoanCalculation> {
    let tax_paid = calculate_total_tax_paid(inputs.auto_price, inputs.trade_in, inputs.sales_tax_rate)?;
    let net_price = checked_sum("net price", &[inputs.auto_price, -inputs.down_payment, -inputs.trade_in])?;

    let (total_loan_amount, upfront_payment) = match inputs.fee_policy() {
        FeePolicy::PaidUpfront => (
            net_price,
            checked_sum("upfront payment", &[inputs.down_payment, tax_paid, inputs.fees])?,
        ),
        FeePolicy::Financed => (
            checked_sum("loan amount", &[net_price, tax_paid, inputs.fees])?,
            inputs.down_payment,
        ),
    };

    let rate = periodic_rate(inputs.interest_rate);
    let monthly_payment = amortization_calculation(total_loan_amount, rate, inputs.loan_term)?;
    let total_loan_payments = monthly_payment
        .checked_mul(Decimal::from(inputs.loan_term))
        .ok_or_else(|| LoanError::arithmetic("total payments"))?;
    let total_loan_interest = checked_sum("total interest", &[total_loan_payments, -total_loan_amount])?;
    let total_cost = checked_sum(
        "total cost",
        &[inputs.auto_price, total_loan_interest, tax_paid, inputs.fees],
    )?;

    debug!(
        policy = ?inputs.fee_policy(),
        %total_loan_amount,
        %monthly_payment,
        %total_loan_interest,
        "loan calculated"
    );

    let schedule = build_schedule(total_loan_amount, rate, monthly_payment, inputs.loan_term)?;

    Ok(LoanCalculation {
        inputs: inputs.clone(),
        result: LoanResult {
            total_loan_amount,
            monthly_payment,
            total_loan_payments,
            total_loan_interest,
            tax_paid,
            upfront_payment,
            total_cost,
        },
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_inputs_happy_path() {
        let calc = calculate_loan(&LoanInputs::default()).unwrap();
        let result = &calc.result;

        assert_eq!(result.tax_paid, dec!(687.5));
        assert_eq!(result.total_loan_amount, dec!(7500));
        assert_eq!(result.upfront_payment, dec!(3187.5));
        assert_eq!(result.monthly_payment.round_dp(2), dec!(141.53));
        assert_eq!(result.total_loan_payments.round_dp(2), dec!(8492.06));
        assert_eq!(result.total_loan_interest.round_dp(2), dec!(992.06));
        assert_eq!(result.total_cost.round_dp(2), dec!(11679.56));
        assert_eq!(calc.schedule.len(), 60);
    }

    #[test]
    fn test_financed_fees_move_into_loan() {
        let inputs = LoanInputs {
            fees: dec!(500),
            include_fees: true,
            ..LoanInputs::default()
        };
        let result = calculate_loan(&inputs).unwrap().result;

        assert_eq!(result.total_loan_amount, dec!(8687.5));
        assert_eq!(result.upfront_payment, dec!(2500));
        assert_eq!(result.monthly_payment.round_dp(2), dec!(163.94));
    }

    #[test]
    fn test_huge_price_is_an_overflow_error() {
        let inputs = LoanInputs {
            auto_price: dec!(20000000000000000000000000000),
            ..LoanInputs::default()
        };
        assert!(inputs.validate().is_ok());
        assert!(matches!(calculate_loan(&inputs), Err(LoanError::Arithmetic { .. })));
    }

    #[test]
    fn test_huge_loan_overflows_total_payments() {
        let inputs = LoanInputs {
            auto_price: dec!(79000000000000000000000000000),
            sales_tax_rate: dec!(0.01),
            down_payment: dec!(0),
            ..LoanInputs::default()
        };
        assert!(inputs.validate().is_ok());
        assert!(matches!(
            calculate_loan(&inputs),
            Err(LoanError::Arithmetic { operation: "total payments" })
        ));
    }

    #[test]
    fn test_fee_policy_from_flag() {
        assert_eq!(FeePolicy::from(false), FeePolicy::PaidUpfront);
        assert_eq!(FeePolicy::from(true), FeePolicy::Financed);
    }

    #[test]
    fn test_zero_term_is_an_error() {
        let inputs = LoanInputs { loan_term: 0, ..LoanInputs::default() };
        assert!(matches!(calculate_loan(&inputs), Err(LoanError::ZeroPeriods)));
    }

    #[test]
    fn test_default_inputs_validate() {
        assert!(LoanInputs::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_field_below_minimum() {
        let inputs = LoanInputs {
            interest_rate: dec!(0),
            fees: dec!(-1),
            ..LoanInputs::default()
        };
        match inputs.validate() {
            Err(LoanError::InvalidInput { field, value, .. }) => {
                assert_eq!(field, "interest_rate");
                assert_eq!(value, "0");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_term() {
        let inputs = LoanInputs { loan_term: 0, ..LoanInputs::default() };
        assert!(matches!(
            inputs.validate(),
            Err(LoanError::InvalidInput { field: "loan_term", .. })
        ));
    }

    #[test]
    fn test_validate_accepts_trade_in_above_price() {
        let inputs = LoanInputs {
            auto_price: dec!(5000),
            trade_in: dec!(6000),
            down_payment: dec!(0),
            ..LoanInputs::default()
        };
        assert!(inputs.validate().is_ok());

        let result = calculate_loan(&inputs).unwrap().result;
        assert!(result.tax_paid < Decimal::ZERO);
        assert!(result.total_loan_amount < Decimal::ZERO);
    }

    #[test]
    fn test_breakdown_shares_sum_to_hundred() {
        let result = calculate_loan(&LoanInputs::default()).unwrap().result;
        let breakdown = result.breakdown().unwrap();

        assert_eq!(breakdown.interest_percent.round_dp(1), dec!(11.7));
        assert_eq!(breakdown.principal_percent.round_dp(1), dec!(88.3));
        assert!((breakdown.interest_percent + breakdown.principal_percent - dec!(100)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_breakdown_none_when_nothing_borrowed() {
        let inputs = LoanInputs {
            down_payment: dec!(10000),
            ..LoanInputs::default()
        };
        let result = calculate_loan(&inputs).unwrap().result;
        assert_eq!(result.breakdown(), None);
    }
}
