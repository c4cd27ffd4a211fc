use anyhow::{Context, Result};
use car_loan_calculator::{LoanInputs, calculate_loan, logging, report};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Calculate a car loan's monthly payment, amortization schedule and total cost.
#[derive(Parser, Debug)]
#[command(name = "car-loan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Price of the car
    #[arg(long, default_value = "10000.00")]
    auto_price: Decimal,

    /// Number of monthly payments
    #[arg(long, default_value_t = 60)]
    loan_term: u32,

    /// Annual interest rate in percent
    #[arg(long, default_value = "5.0")]
    interest_rate: Decimal,

    #[arg(long, default_value = "2500.00")]
    down_payment: Decimal,

    /// Trade-in value of the current car
    #[arg(long, default_value = "0.00")]
    trade_in: Decimal,

    /// Sales tax rate in percent
    #[arg(long, default_value = "6.875")]
    sales_tax_rate: Decimal,

    /// Title, registration, and other fees
    #[arg(long, default_value = "0.00")]
    fees: Decimal,

    /// Include all fees and sales tax in the loan
    #[arg(long, default_value_t = false)]
    include_fees: bool,

    /// Print the month-by-month payment schedule
    #[arg(short, long, default_value_t = false)]
    schedule: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

impl From<&Args> for LoanInputs {
    fn from(args: &Args) -> Self {
        Self {
            auto_price: args.auto_price,
            loan_term: args.loan_term,
            interest_rate: args.interest_rate,
            down_payment: args.down_payment,
            trade_in: args.trade_in,
            sales_tax_rate: args.sales_tax_rate,
            fees: args.fees,
            include_fees: args.include_fees,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_cli_logger(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    let inputs = LoanInputs::from(&args);
    inputs.validate().context("Invalid loan inputs")?;

    let calc = calculate_loan(&inputs).context("Failed to calculate loan")?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&calc, args.schedule)),
        OutputFormat::Json => println!("{}", report::render_json(&calc).context("Failed to render JSON")?),
    }

    Ok(())
}
