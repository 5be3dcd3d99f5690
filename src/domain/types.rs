//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - edited in place by the CLI/TUI front-ends
//! - sent to the scoring service as JSON
//! - exported alongside the interpreted result

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Housing situation as understood by the scoring model.
///
/// The serialized names are the exact category labels the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HousingType {
    #[serde(rename = "House / apartment")]
    #[value(name = "house")]
    HouseApartment,
    #[serde(rename = "Rented apartment")]
    #[value(name = "rented")]
    RentedApartment,
    #[serde(rename = "With parents")]
    #[value(name = "parents")]
    WithParents,
    #[serde(rename = "Municipal apartment")]
    #[value(name = "municipal")]
    MunicipalApartment,
}

impl HousingType {
    pub const ALL: [HousingType; 4] = [
        HousingType::HouseApartment,
        HousingType::RentedApartment,
        HousingType::WithParents,
        HousingType::MunicipalApartment,
    ];

    /// Wire label (also used for display).
    pub fn label(self) -> &'static str {
        match self {
            HousingType::HouseApartment => "House / apartment",
            HousingType::RentedApartment => "Rented apartment",
            HousingType::WithParents => "With parents",
            HousingType::MunicipalApartment => "Municipal apartment",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Family status as understood by the scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum FamilyStatus {
    #[serde(rename = "Married")]
    Married,
    #[serde(rename = "Single / not married")]
    Single,
    #[serde(rename = "Civil marriage")]
    #[value(name = "civil")]
    CivilMarriage,
    #[serde(rename = "Separated")]
    Separated,
}

impl FamilyStatus {
    pub const ALL: [FamilyStatus; 4] = [
        FamilyStatus::Married,
        FamilyStatus::Single,
        FamilyStatus::CivilMarriage,
        FamilyStatus::Separated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FamilyStatus::Married => "Married",
            FamilyStatus::Single => "Single / not married",
            FamilyStatus::CivilMarriage => "Civil marriage",
            FamilyStatus::Separated => "Separated",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Credit-history proxy.
///
/// No credit-bureau signal is available to the client, so the applicant picks
/// one of a few representative external scores instead of typing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CreditHistory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditHistory {
    pub const ALL: [CreditHistory; 4] = [
        CreditHistory::Excellent,
        CreditHistory::Good,
        CreditHistory::Fair,
        CreditHistory::Poor,
    ];

    /// Representative `EXT_SOURCE_2` value sent to the predictor.
    pub fn score(self) -> f64 {
        match self {
            CreditHistory::Excellent => 0.85,
            CreditHistory::Good => 0.65,
            CreditHistory::Fair => 0.35,
            CreditHistory::Poor => 0.10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreditHistory::Excellent => "Excellent (0.85)",
            CreditHistory::Good => "Good (0.65)",
            CreditHistory::Fair => "Fair (0.35)",
            CreditHistory::Poor => "Poor (0.10)",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Applicant gender, only sent by deployments whose model uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    #[serde(rename = "M")]
    #[value(name = "m")]
    Male,
    #[serde(rename = "F")]
    #[value(name = "f")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Highest education level, only sent by deployments whose model uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Education {
    Secondary,
    University,
}

impl Education {
    pub const ALL: [Education; 2] = [Education::Secondary, Education::University];

    pub fn label(self) -> &'static str {
        match self {
            Education::Secondary => "Secondary",
            Education::University => "University",
        }
    }
}

/// Step through an optional choice: `None -> first -> ... -> last -> None`.
pub fn cycle_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>, delta: i32) -> Option<T> {
    // Index 0 stands for "not sent".
    let len = all.len() as i32 + 1;
    let idx = match current {
        None => 0,
        Some(v) => all.iter().position(|x| *x == v).map(|i| i as i32 + 1).unwrap_or(0),
    };
    let next = (idx + delta).rem_euclid(len);
    if next == 0 { None } else { Some(all[(next - 1) as usize]) }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i32) -> T {
    let idx = all.iter().position(|x| *x == current).unwrap_or(0) as i32;
    let next = (idx + delta).rem_euclid(all.len() as i32);
    all[next as usize]
}

/// What the applicant has typed into the form.
///
/// Created fresh per session and edited in place; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationInput {
    pub annual_income: f64,
    pub requested_credit: f64,
    pub monthly_annuity: f64,
    pub age_years: u32,
    pub years_employed: u32,
    pub housing_type: HousingType,
    pub family_status: FamilyStatus,
    pub credit_history: CreditHistory,
    pub gender: Option<Gender>,
    pub education: Option<Education>,
}

impl Default for ApplicationInput {
    /// Starting values of a fresh form.
    fn default() -> Self {
        Self {
            annual_income: 600_000_000.0,
            requested_credit: 1_000_000_000.0,
            monthly_annuity: 25_000_000.0,
            age_years: 30,
            years_employed: 5,
            housing_type: HousingType::HouseApartment,
            family_status: FamilyStatus::Married,
            credit_history: CreditHistory::Good,
            gender: None,
            education: None,
        }
    }
}

/// Canonical payload posted to the scoring service.
///
/// Field order is fixed, so the same input always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringRequest {
    #[serde(rename = "AMT_INCOME_TOTAL")]
    pub amt_income_total: f64,
    #[serde(rename = "AMT_CREDIT")]
    pub amt_credit: f64,
    #[serde(rename = "AMT_ANNUITY")]
    pub amt_annuity: f64,
    /// Always `<= 0`.
    #[serde(rename = "DAYS_BIRTH")]
    pub days_birth: i64,
    /// Always `<= 0`.
    #[serde(rename = "DAYS_EMPLOYED")]
    pub days_employed: i64,
    #[serde(rename = "NAME_HOUSING_TYPE")]
    pub housing_type: HousingType,
    #[serde(rename = "NAME_FAMILY_STATUS")]
    pub family_status: FamilyStatus,
    #[serde(rename = "EXT_SOURCE_2")]
    pub ext_source_2: f64,
    #[serde(rename = "CODE_GENDER", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "EDUCATION", skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
}

/// Body returned by the scoring service.
///
/// `status` stays a string here; the interpreter decides whether it is one of
/// the known decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResponse {
    pub status: String,
    pub probability: f64,
    pub credit_score: f64,
    #[serde(default)]
    pub threshold: Option<f64>,
    pub message: String,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Decision made by the remote predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Parse the wire status. Anything but the two known values is rejected.
    pub fn from_status(status: &str) -> Option<Self> {
        match status {
            "APPROVE" => Some(Decision::Approve),
            "REJECT" => Some(Decision::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => write!(f, "APPROVE"),
            Decision::Reject => write!(f, "REJECT"),
        }
    }
}
