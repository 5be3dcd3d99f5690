//! Command-line parsing for the credit scoring client.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the form/interpretation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    ApplicationInput, CreditHistory, Education, FamilyStatus, Gender, HousingType,
};
use crate::form::constraints::{MAX_AGE, MAX_YEARS_EMPLOYED, MIN_AGE};
use crate::form::parse_amount;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "credit", version, about = "Loan application scoring client")]
pub struct Cli {
    /// Scoring service URL (overrides CREDIT_SCORING_URL).
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one application and print the decision.
    Score(ScoreArgs),
    /// Print the JSON payload that would be sent, without sending it.
    Payload(ApplicationArgs),
    /// Launch the interactive TUI form.
    Tui,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub application: ApplicationArgs,

    /// Ask for each field on stdin instead of using flags.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Write request, response and presentation to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Applicant fields. Defaults match a fresh form.
#[derive(Debug, Args, Clone)]
pub struct ApplicationArgs {
    /// Total annual income (separators allowed, e.g. 600,000,000).
    #[arg(long, value_parser = parse_amount_arg, default_value = "600000000")]
    pub income: f64,

    /// Amount of credit requested.
    #[arg(long, value_parser = parse_amount_arg, default_value = "1000000000")]
    pub credit: f64,

    /// Monthly repayment the applicant can afford.
    #[arg(long, value_parser = parse_amount_arg, default_value = "25000000")]
    pub annuity: f64,

    /// Age in years.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(MIN_AGE as i64..=MAX_AGE as i64))]
    pub age: u32,

    /// Years in current employment.
    #[arg(long = "years-employed", default_value_t = 5, value_parser = clap::value_parser!(u32).range(0..=MAX_YEARS_EMPLOYED as i64))]
    pub years_employed: u32,

    #[arg(long, value_enum, default_value_t = HousingType::HouseApartment)]
    pub housing: HousingType,

    #[arg(long, value_enum, default_value_t = FamilyStatus::Married)]
    pub family: FamilyStatus,

    /// Credit-history proxy score.
    #[arg(long = "history", value_enum, default_value_t = CreditHistory::Good)]
    pub credit_history: CreditHistory,

    /// Only sent when given.
    #[arg(long, value_enum)]
    pub gender: Option<Gender>,

    /// Only sent when given.
    #[arg(long, value_enum)]
    pub education: Option<Education>,
}

impl ApplicationArgs {
    pub fn to_input(&self) -> ApplicationInput {
        ApplicationInput {
            annual_income: self.income,
            requested_credit: self.credit,
            monthly_annuity: self.annuity,
            age_years: self.age,
            years_employed: self.years_employed,
            housing_type: self.housing,
            family_status: self.family,
            credit_history: self.credit_history,
            gender: self.gender,
            education: self.education,
        }
    }
}

fn parse_amount_arg(raw: &str) -> Result<f64, String> {
    match parse_amount(raw) {
        Some(v) if v > 0.0 => Ok(v),
        Some(_) => Err("amount must be positive".to_string()),
        None => Err(format!("'{raw}' is not an amount")),
    }
}
