//! Hard bounds on form fields.
//!
//! Unlike advisories these gate submission: an input that violates any bound
//! is never sent.

use std::fmt;

use crate::domain::ApplicationInput;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 70;
pub const MAX_YEARS_EMPLOYED: u32 = 50;

/// Editable fields of the application form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    AnnualIncome,
    RequestedCredit,
    MonthlyAnnuity,
    Age,
    YearsEmployed,
    HousingType,
    FamilyStatus,
    CreditHistory,
    Gender,
    Education,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::AnnualIncome,
        Field::RequestedCredit,
        Field::MonthlyAnnuity,
        Field::Age,
        Field::YearsEmployed,
        Field::HousingType,
        Field::FamilyStatus,
        Field::CreditHistory,
        Field::Gender,
        Field::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::AnnualIncome => "Annual income",
            Field::RequestedCredit => "Requested credit",
            Field::MonthlyAnnuity => "Monthly repayment",
            Field::Age => "Age",
            Field::YearsEmployed => "Years employed",
            Field::HousingType => "Housing",
            Field::FamilyStatus => "Family status",
            Field::CreditHistory => "Credit history",
            Field::Gender => "Gender",
            Field::Education => "Education",
        }
    }

    /// Fields typed as numbers (as opposed to picked from a list).
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::AnnualIncome
                | Field::RequestedCredit
                | Field::MonthlyAnnuity
                | Field::Age
                | Field::YearsEmployed
        )
    }

    pub fn is_amount(self) -> bool {
        matches!(
            self,
            Field::AnnualIncome | Field::RequestedCredit | Field::MonthlyAnnuity
        )
    }
}

/// One violated bound.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub field: Field,
    pub problem: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.problem)
    }
}

/// Check every bound and report all violations at once.
pub fn check_constraints(input: &ApplicationInput) -> Result<(), Vec<FieldIssue>> {
    let mut issues = Vec::new();

    for (field, value) in [
        (Field::AnnualIncome, input.annual_income),
        (Field::RequestedCredit, input.requested_credit),
        (Field::MonthlyAnnuity, input.monthly_annuity),
    ] {
        if !(value.is_finite() && value > 0.0) {
            issues.push(FieldIssue {
                field,
                problem: "must be a positive amount".to_string(),
            });
        }
    }

    if !(MIN_AGE..=MAX_AGE).contains(&input.age_years) {
        issues.push(FieldIssue {
            field: Field::Age,
            problem: format!("must be between {MIN_AGE} and {MAX_AGE}"),
        });
    }

    if input.years_employed > MAX_YEARS_EMPLOYED {
        issues.push(FieldIssue {
            field: Field::YearsEmployed,
            problem: format!("must be between 0 and {MAX_YEARS_EMPLOYED}"),
        });
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_is_valid() {
        assert_eq!(check_constraints(&ApplicationInput::default()), Ok(()));
    }

    #[test]
    fn reports_every_violation() {
        let input = ApplicationInput {
            annual_income: 0.0,
            monthly_annuity: f64::NAN,
            age_years: 17,
            years_employed: 51,
            ..ApplicationInput::default()
        };
        let issues = check_constraints(&input).unwrap_err();
        let fields: Vec<Field> = issues.iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::AnnualIncome,
                Field::MonthlyAnnuity,
                Field::Age,
                Field::YearsEmployed
            ]
        );
        assert_eq!(issues[2].to_string(), "Age: must be between 18 and 70");
    }

    #[test]
    fn bounds_are_inclusive() {
        let oldest = ApplicationInput {
            age_years: MAX_AGE,
            years_employed: MAX_YEARS_EMPLOYED,
            ..ApplicationInput::default()
        };
        assert!(check_constraints(&oldest).is_ok());
        let youngest = ApplicationInput {
            age_years: MIN_AGE,
            years_employed: 0,
            ..ApplicationInput::default()
        };
        assert!(check_constraints(&youngest).is_ok());
    }
}
