//! `car_loan_calculator` works out what a car loan really costs.
//!
//! From the price, term, interest rate, down payment, trade-in, sales tax and
//! fees it computes:
//! - the fixed **monthly payment** using the standard amortization formula,
//! - the **amortization schedule**, splitting every payment into interest and principal,
//! - the **totals**: amount borrowed, interest paid, cash due at signing and total cost.
//!
//! Sales tax and fees can either be paid upfront with the down payment or
//! rolled into the loan; see [`FeePolicy`].
//!
//! ## Usage
//!
//! ```rust
//! use car_loan_calculator::{calculate_loan, LoanInputs};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let inputs = LoanInputs {
//!         auto_price: dec!(10000),
//!         loan_term: 60,
//!         interest_rate: dec!(5.0),
//!         down_payment: dec!(2500),
//!         ..LoanInputs::default()
//!     };
//!
//!     match calculate_loan(&inputs) {
//!         Ok(calc) => {
//!             println!("Monthly Payment: {:.2}", calc.result.monthly_payment);
//!             println!("Total Interest:  {:.2}", calc.result.total_loan_interest);
//!             println!("Total Cost:      {:.2}", calc.result.total_cost);
//!             assert_eq!(calc.schedule.len(), 60);
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating loan: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod amortization;
pub mod error;
pub mod loan;
pub mod logging;
pub mod report;
pub mod tax;

pub use amortization::{ScheduleEntry, amortization_calculation, build_schedule, periodic_rate};
pub use error::LoanError;
pub use loan::{FeePolicy, LoanBreakdown, LoanCalculation, LoanInputs, LoanResult, calculate_loan};
pub use tax::calculate_total_tax_paid;
