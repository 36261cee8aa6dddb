pub mod currency;
pub mod finance;
pub mod health;
pub mod measure;
pub mod setup;
pub mod shell;
pub mod ui;

use crate::core::health::Gender;
use crate::core::measurement::Unit;
use crate::session::Session;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum AppCommand {
    /// Convert an amount between currencies
    Currency(CurrencyArgs),
    /// List supported currencies
    Currencies,
    /// Convert a value into the other units of its category
    Measure(MeasureArgs),
    /// Calculate simple or compound interest
    Interest(InterestArgs),
    /// Calculate the monthly payment of a loan
    Loan(LoanArgs),
    /// Split a bill with tip
    Tip(TipArgs),
    /// Calculate body mass index
    Bmi(BmiArgs),
    /// Estimate daily calorie needs
    Calories(CaloriesArgs),
}

/// Arguments left out fall back to the values used last time.
#[derive(Debug, Clone, Default, Args)]
pub struct CurrencyArgs {
    /// Amount to convert
    #[arg(allow_hyphen_values = true)]
    pub amount: Option<String>,
    /// Source currency code
    pub from: Option<String>,
    /// Target currency code
    pub to: Option<String>,
    /// Swap source and target currencies
    #[arg(short, long)]
    pub swap: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MeasureArgs {
    /// Unit of the value (km, miles, kg, lbs, c, f, k, sqm, sqft, l, gal, kmh, mph)
    pub unit: Option<Unit>,
    /// Value to convert
    #[arg(allow_hyphen_values = true)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct InterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Option<String>,
    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<String>,
    /// Time in years
    #[arg(long)]
    pub time: Option<String>,
    /// Compounding periods per year
    #[arg(long)]
    pub compounds_per_year: Option<String>,
    /// Use compound interest instead of simple interest
    #[arg(long)]
    pub compound: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LoanArgs {
    /// Loan amount
    #[arg(long)]
    pub amount: Option<String>,
    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<String>,
    /// Term in years
    #[arg(long)]
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TipArgs {
    /// Bill amount
    #[arg(long)]
    pub bill: Option<String>,
    /// Tip in percent
    #[arg(long)]
    pub percent: Option<String>,
    /// Number of people splitting the bill
    #[arg(long)]
    pub people: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BmiArgs {
    /// Height in centimeters
    #[arg(long)]
    pub height: Option<String>,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CaloriesArgs {
    /// Height in centimeters
    #[arg(long)]
    pub height: Option<String>,
    /// Weight in kilograms
    #[arg(long)]
    pub weight: Option<String>,
    /// Age in years
    #[arg(long)]
    pub age: Option<String>,
    /// male or female
    #[arg(long)]
    pub gender: Option<Gender>,
}

/// Runs one command against the session and returns the text to display.
pub async fn execute(session: &mut Session, command: AppCommand) -> Result<String> {
    let output = match command {
        AppCommand::Currency(args) => currency::run(session, args).await,
        AppCommand::Currencies => currency::list(session),
        AppCommand::Measure(args) => measure::run(session, args),
        AppCommand::Interest(args) => finance::interest(session, args),
        AppCommand::Loan(args) => finance::loan(session, args),
        AppCommand::Tip(args) => finance::tip(session, args),
        AppCommand::Bmi(args) => health::bmi(session, args),
        AppCommand::Calories(args) => health::calories(session, args),
    };
    Ok(output)
}

/// Parses a user-entered decimal number.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a user-entered count, dropping any fractional part.
pub(crate) fn parse_count(raw: &str) -> Option<u32> {
    parse_number(raw)
        .filter(|v| *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v.trunc() as u32)
}
