//! Form fields -> scoring payload.

use crate::domain::{ApplicationInput, ScoringRequest};

const DAYS_PER_YEAR: i64 = 365;

/// Build the payload the scoring service expects.
///
/// Ages and tenures are sent as negative day counts; everything else is copied
/// through exactly as selected.
pub fn map_to_request(input: &ApplicationInput) -> ScoringRequest {
    ScoringRequest {
        amt_income_total: input.annual_income,
        amt_credit: input.requested_credit,
        amt_annuity: input.monthly_annuity,
        days_birth: negative_days(input.age_years),
        days_employed: negative_days(input.years_employed),
        housing_type: input.housing_type,
        family_status: input.family_status,
        ext_source_2: input.credit_history.score(),
        gender: input.gender,
        education: input.education,
    }
}

/// `-abs(years * 365)`.
pub fn negative_days(years: u32) -> i64 {
    -(i64::from(years) * DAYS_PER_YEAR).abs()
}
