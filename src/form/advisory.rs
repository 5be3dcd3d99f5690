//! Non-blocking warnings derived from the form fields.
//!
//! Nothing here prevents a submission. The functions are stateless and cheap,
//! so front-ends call them after every edit.

use std::fmt;

use serde::Serialize;

use crate::domain::ApplicationInput;
use crate::form::amount::format_amount;

/// Loan terms longer than this (in years) trigger an advisory.
pub const LONG_LOAN_TERM_YEARS: f64 = 30.0;
/// Monthly repayment share of monthly income above which we warn.
pub const MAX_DEBT_TO_INCOME: f64 = 0.7;
/// Requested credit as a multiple of annual income above which we warn.
pub const MAX_LOAN_TO_INCOME: f64 = 15.0;
/// Monthly income below which the service refuses outright.
pub const MIN_MONTHLY_INCOME: f64 = 3_000_000.0;
/// Ages the service scores; outside this window it rejects.
pub const MIN_SCORED_AGE: u32 = 20;
pub const MAX_SCORED_AGE: u32 = 60;

/// Informational warning shown next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationAdvisory {
    LongLoanTerm { years: f64 },
    HighDebtToIncome { ratio: f64 },
    HighLoanToIncome { multiple: f64 },
    LowIncome { annual_income: f64 },
    AgeOutsideWindow { age: u32 },
}

impl fmt::Display for ValidationAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationAdvisory::LongLoanTerm { years } => write!(
                f,
                "At this repayment rate, {years:.1} years are required to settle the debt. \
                 Consider increasing the monthly repayment."
            ),
            ValidationAdvisory::HighDebtToIncome { ratio } => write!(
                f,
                "The monthly repayment is {:.1}% of monthly income (limit {:.0}%).",
                ratio * 100.0,
                MAX_DEBT_TO_INCOME * 100.0
            ),
            ValidationAdvisory::HighLoanToIncome { multiple } => write!(
                f,
                "The requested credit is {multiple:.1}x annual income (limit {MAX_LOAN_TO_INCOME:.0}x)."
            ),
            ValidationAdvisory::LowIncome { annual_income } => write!(
                f,
                "Monthly income of {} is below the minimum of {}.",
                format_amount(annual_income / 12.0),
                format_amount(MIN_MONTHLY_INCOME)
            ),
            ValidationAdvisory::AgeOutsideWindow { age } => write!(
                f,
                "Age {age} is outside the supported range ({MIN_SCORED_AGE}-{MAX_SCORED_AGE})."
            ),
        }
    }
}

/// Years needed to repay `credit` at `annuity` per month.
///
/// `None` when either operand is missing or the annuity is not positive.
pub fn compute_loan_term(credit: Option<f64>, annuity: Option<f64>) -> Option<f64> {
    let credit = credit?;
    let annuity = annuity?;
    if !(annuity > 0.0) || !credit.is_finite() {
        return None;
    }
    Some(credit / annuity / 12.0)
}

pub fn loan_term_advisory(credit: Option<f64>, annuity: Option<f64>) -> Option<ValidationAdvisory> {
    let years = compute_loan_term(credit, annuity)?;
    (years > LONG_LOAN_TERM_YEARS).then_some(ValidationAdvisory::LongLoanTerm { years })
}

fn debt_to_income_advisory(income: Option<f64>, annuity: Option<f64>) -> Option<ValidationAdvisory> {
    let monthly_income = income? / 12.0;
    let annuity = annuity?;
    if !(monthly_income > 0.0) || !annuity.is_finite() {
        return None;
    }
    let ratio = annuity / monthly_income;
    (ratio > MAX_DEBT_TO_INCOME).then_some(ValidationAdvisory::HighDebtToIncome { ratio })
}

fn loan_to_income_advisory(income: Option<f64>, credit: Option<f64>) -> Option<ValidationAdvisory> {
    let income = income?;
    let credit = credit?;
    if !(income > 0.0) || !credit.is_finite() {
        return None;
    }
    let multiple = credit / income;
    (multiple > MAX_LOAN_TO_INCOME).then_some(ValidationAdvisory::HighLoanToIncome { multiple })
}

fn low_income_advisory(income: Option<f64>) -> Option<ValidationAdvisory> {
    let annual_income = income?;
    if !annual_income.is_finite() {
        return None;
    }
    (annual_income < MIN_MONTHLY_INCOME * 12.0).then_some(ValidationAdvisory::LowIncome { annual_income })
}

/// Warn when `age` falls outside the ages the service scores.
pub fn age_advisory(age: Option<u32>) -> Option<ValidationAdvisory> {
    let age = age?;
    (!(MIN_SCORED_AGE..=MAX_SCORED_AGE).contains(&age)).then_some(ValidationAdvisory::AgeOutsideWindow { age })
}

/// Advisories for amounts that may be partially entered.
pub fn advisories_for_amounts(
    income: Option<f64>,
    credit: Option<f64>,
    annuity: Option<f64>,
) -> Vec<ValidationAdvisory> {
    [
        low_income_advisory(income),
        loan_term_advisory(credit, annuity),
        debt_to_income_advisory(income, annuity),
        loan_to_income_advisory(income, credit),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// All advisories for a complete form.
pub fn advisories(input: &ApplicationInput) -> Vec<ValidationAdvisory> {
    let mut found = advisories_for_amounts(
        Some(input.annual_income),
        Some(input.requested_credit),
        Some(input.monthly_annuity),
    );
    found.extend(age_advisory(Some(input.age_years)));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_term_matches_credit_over_annuity_over_twelve() {
        let years = compute_loan_term(Some(1_000_000_000.0), Some(25_000_000.0)).unwrap();
        assert!((years - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn loan_term_is_undefined_without_positive_annuity() {
        assert_eq!(compute_loan_term(Some(1_000.0), Some(0.0)), None);
        assert_eq!(compute_loan_term(Some(1_000.0), Some(-5.0)), None);
        assert_eq!(compute_loan_term(Some(1_000.0), None), None);
        assert_eq!(compute_loan_term(None, Some(10.0)), None);
        assert_eq!(loan_term_advisory(Some(1_000.0), Some(0.0)), None);
    }

    #[test]
    fn advisory_only_above_thirty_years() {
        // 360 months at 1.0 per month is exactly 30 years.
        assert_eq!(loan_term_advisory(Some(360.0), Some(1.0)), None);
        let adv = loan_term_advisory(Some(361.0), Some(1.0)).expect("over 30 years");
        match adv {
            ValidationAdvisory::LongLoanTerm { years } => assert!(years > 30.0),
            other => panic!("unexpected advisory {other:?}"),
        }
        assert!(adv.to_string().contains("30.1 years"));
    }

    #[test]
    fn default_form_has_no_advisories() {
        assert!(advisories(&ApplicationInput::default()).is_empty());
    }

    #[test]
    fn flags_debt_and_loan_ratios() {
        let input = ApplicationInput {
            annual_income: 60_000_000.0,
            requested_credit: 1_200_000_000.0,
            monthly_annuity: 4_000_000.0,
            ..ApplicationInput::default()
        };
        let found = advisories(&input);
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|a| matches!(a, ValidationAdvisory::HighDebtToIncome { ratio } if (*ratio - 0.8).abs() < 1e-9)));
        assert!(found.iter().any(|a| matches!(a, ValidationAdvisory::HighLoanToIncome { multiple } if (*multiple - 20.0).abs() < 1e-9)));
    }

    #[test]
    fn low_income_edges() {
        let at_minimum = ApplicationInput {
            annual_income: 36_000_000.0,
            requested_credit: 100_000_000.0,
            monthly_annuity: 1_000_000.0,
            ..ApplicationInput::default()
        };
        assert!(advisories(&at_minimum).is_empty());

        let below = ApplicationInput {
            annual_income: 35_999_988.0,
            ..at_minimum
        };
        let found = advisories(&below);
        assert!(matches!(found.as_slice(), [ValidationAdvisory::LowIncome { .. }]));
        assert_eq!(
            found[0].to_string(),
            "Monthly income of 2,999,999 is below the minimum of 3,000,000."
        );
    }

    #[test]
    fn age_window_edges() {
        for age in [MIN_SCORED_AGE, 35, MAX_SCORED_AGE] {
            assert_eq!(age_advisory(Some(age)), None, "age {age}");
        }
        assert_eq!(age_advisory(None), None);

        let young = ApplicationInput {
            age_years: 19,
            ..ApplicationInput::default()
        };
        assert_eq!(advisories(&young), vec![ValidationAdvisory::AgeOutsideWindow { age: 19 }]);

        let old = ApplicationInput {
            age_years: 61,
            ..ApplicationInput::default()
        };
        assert_eq!(advisories(&old), vec![ValidationAdvisory::AgeOutsideWindow { age: 61 }]);
        assert_eq!(
            advisories(&old)[0].to_string(),
            "Age 61 is outside the supported range (20-60)."
        );
    }

    #[test]
    fn partial_amounts_skip_what_cannot_be_computed() {
        let found = advisories_for_amounts(None, Some(1_000_000_000.0), Some(1_000_000.0));
        assert_eq!(found.len(), 1);
        assert!(matches!(found[0], ValidationAdvisory::LongLoanTerm { .. }));
    }
}
