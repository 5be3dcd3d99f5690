//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the interpretation logic stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{ApplicationInput, ScoringRequest};
use crate::form::{ValidationAdvisory, compute_loan_term, format_amount};
use crate::plot::render_ascii_gauge;
use crate::report::{PresentationModel, ThresholdSource};

const GAUGE_WIDTH: usize = 48;

/// Echo of the application as entered.
pub fn format_application(input: &ApplicationInput) -> String {
    let mut out = String::new();
    out.push_str("=== Loan application ===\n");
    out.push_str(&format!("Annual income     : {}\n", format_amount(input.annual_income)));
    out.push_str(&format!("Requested credit  : {}\n", format_amount(input.requested_credit)));
    out.push_str(&format!("Monthly repayment : {}\n", format_amount(input.monthly_annuity)));
    match compute_loan_term(Some(input.requested_credit), Some(input.monthly_annuity)) {
        Some(years) => out.push_str(&format!("Implied term      : {years:.1} years\n")),
        None => out.push_str("Implied term      : -\n"),
    }
    out.push_str(&format!("Age               : {}\n", input.age_years));
    out.push_str(&format!("Years employed    : {}\n", input.years_employed));
    out.push_str(&format!("Housing           : {}\n", input.housing_type.label()));
    out.push_str(&format!("Family status     : {}\n", input.family_status.label()));
    out.push_str(&format!("Credit history    : {}\n", input.credit_history.label()));
    if let Some(g) = input.gender {
        out.push_str(&format!("Gender            : {}\n", g.label()));
    }
    if let Some(e) = input.education {
        out.push_str(&format!("Education         : {}\n", e.label()));
    }
    out
}

pub fn format_advisories(advisories: &[ValidationAdvisory]) -> String {
    let mut out = String::new();
    for a in advisories {
        out.push_str(&format!("! {a}\n"));
    }
    out
}

/// Pretty JSON of the outbound payload.
pub fn format_request(request: &ScoringRequest) -> String {
    serde_json::to_string_pretty(request).unwrap_or_else(|e| format!("<unserializable request: {e}>"))
}

/// Decision banner, gauge, reasons and summary.
pub fn format_presentation(model: &PresentationModel) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", model.decision_label));
    if !model.message.is_empty() {
        out.push_str(&model.message);
        out.push('\n');
    }
    out.push('\n');

    out.push_str(&format!("Risk probability ({} band):\n", model.gauge.band.label()));
    out.push_str(&render_ascii_gauge(&model.gauge, GAUGE_WIDTH));
    out.push_str("\n\n");

    out.push_str("Main factors:\n");
    if model.reasons.is_empty() {
        out.push_str("  (no explanation available)\n");
    } else {
        for reason in &model.reasons {
            out.push_str(&format!("  - {reason}\n"));
        }
    }
    out.push('\n');

    let marker = match model.summary.threshold_source {
        ThresholdSource::Reported => "",
        ThresholdSource::Default => " (default)",
    };
    out.push_str(&format!(
        "Credit score: {:.0} | Risk threshold: {:.1}%{marker}\n",
        model.summary.credit_score, model.summary.threshold_percent
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScoringResponse;
    use crate::form::{advisories, map_to_request};
    use crate::report::interpret;

    fn model(status: &str, probability: f64, threshold: Option<f64>, reasons: &[&str]) -> PresentationModel {
        interpret(&ScoringResponse {
            status: status.to_string(),
            probability,
            credit_score: 412.0,
            threshold,
            message: "High risk according to the model.".to_string(),
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn presentation_lists_reasons_in_order() {
        let out = format_presentation(&model("REJECT", 0.62, Some(0.15), &["high debt", "short tenure"]));
        assert!(out.starts_with("=== REJECTED ===\n"));
        assert!(out.contains("Risk probability (medium band)"));
        let debt = out.find("  - high debt").unwrap();
        let tenure = out.find("  - short tenure").unwrap();
        assert!(debt < tenure);
        assert!(out.contains("Credit score: 412 | Risk threshold: 15.0%\n"));
    }

    #[test]
    fn presentation_marks_missing_explanations_and_default_threshold() {
        let out = format_presentation(&model("APPROVE", 0.05, None, &[]));
        assert!(out.starts_with("=== APPROVED ===\n"));
        assert!(out.contains("(no explanation available)"));
        assert!(out.contains("Risk threshold: 15.0% (default)"));
    }

    #[test]
    fn application_echo_shows_implied_term() {
        let out = format_application(&ApplicationInput::default());
        assert!(out.contains("Requested credit  : 1,000,000,000"));
        assert!(out.contains("Implied term      : 3.3 years"));
        assert!(!out.contains("Gender"));
    }

    #[test]
    fn advisories_are_prefixed() {
        let input = ApplicationInput {
            monthly_annuity: 1_000_000.0,
            ..ApplicationInput::default()
        };
        let out = format_advisories(&advisories(&input));
        assert!(out.starts_with("! At this repayment rate, 83.3 years"));
    }

    #[test]
    fn request_is_pretty_json() {
        let out = format_request(&map_to_request(&ApplicationInput::default()));
        assert!(out.contains("\"DAYS_BIRTH\": -10950"));
    }
}
