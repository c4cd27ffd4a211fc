//! Sales tax owed on a vehicle purchase.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{LoanError, Result};

/// Returns the sales tax owed on the price net of the trade-in.
///
/// `tax_rate` is a percentage (`6.875` means 6.875%). A trade-in worth more
/// than the car produces a negative amount, which is returned as is.
///
/// # Errors
///
/// Returns [`LoanError::Arithmetic`] if the taxable amount or the tax overflows.
pub fn calculate_total_tax_paid(car_price: Decimal, trade_in_amount: Decimal, tax_rate: Decimal) -> Result<Decimal> {
    car_price
        .checked_sub(trade_in_amount)
        .and_then(|taxable| taxable.checked_mul(tax_rate))
        .map(|tax| tax / dec!(100))
        .ok_or_else(|| LoanError::arithmetic("sales tax"))
}
