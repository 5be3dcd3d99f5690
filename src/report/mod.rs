//! Response interpretation: what the user sees for a scoring response.
//!
//! `interpret` is pure. It never second-guesses the predictor's decision; it
//! only checks that the response is usable and maps it onto display values.

use serde::Serialize;

use crate::domain::{Decision, ScoringResponse};
use crate::error::ScoringError;

pub mod format;

pub use format::*;

/// Threshold shown when the service does not report one.
pub const DEFAULT_THRESHOLD: f64 = 0.15;

/// Two-value severity; not a function of how close the probability is to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    LowRisk,
    HighRisk,
}

impl Severity {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Severity::LowRisk => GREEN,
            Severity::HighRisk => RED,
        }
    }
}

const GREEN: (u8, u8, u8) = (82, 196, 26);
const AMBER: (u8, u8, u8) = (250, 173, 20);
const RED: (u8, u8, u8) = (245, 34, 45);

/// Fixed thirds of the gauge, independent of the decision threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Low,
    Medium,
    High,
}

impl GaugeBand {
    pub fn for_position(position: f64) -> Self {
        if position < 1.0 / 3.0 {
            GaugeBand::Low
        } else if position < 2.0 / 3.0 {
            GaugeBand::Medium
        } else {
            GaugeBand::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GaugeBand::Low => "low",
            GaugeBand::Medium => "medium",
            GaugeBand::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gauge {
    /// Risk probability in `[0, 1]`.
    pub position: f64,
    pub band: GaugeBand,
}

impl Gauge {
    pub fn new(probability: f64) -> Self {
        let position = probability.clamp(0.0, 1.0);
        Self {
            position,
            band: GaugeBand::for_position(position),
        }
    }

    pub fn percent(&self) -> f64 {
        self.position * 100.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        gauge_rgb(self.position)
    }
}

/// Colour along the gauge: green at 0, amber at 0.5, red at 1.
pub fn gauge_rgb(position: f64) -> (u8, u8, u8) {
    let p = if position.is_finite() { position.clamp(0.0, 1.0) } else { 0.0 };
    if p <= 0.5 {
        lerp_rgb(GREEN, AMBER, p / 0.5)
    } else {
        lerp_rgb(AMBER, RED, (p - 0.5) / 0.5)
    }
}

fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| -> u8 { (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8 };
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdSource {
    Reported,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub credit_score: f64,
    pub threshold_percent: f64,
    pub threshold_source: ThresholdSource,
}

/// Display-ready view of one scoring response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationModel {
    pub decision: Decision,
    pub decision_label: &'static str,
    pub severity: Severity,
    pub gauge: Gauge,
    pub message: String,
    /// Verbatim from the service; empty means no explanation is available.
    pub reasons: Vec<String>,
    pub summary: SummaryMetrics,
}

/// Map a response onto a `PresentationModel`, or reject it as malformed.
pub fn interpret(response: &ScoringResponse) -> Result<PresentationModel, ScoringError> {
    let decision = Decision::from_status(&response.status).ok_or_else(|| {
        ScoringError::MalformedResponse(format!("unknown status '{}'", response.status))
    })?;

    if !(0.0..=1.0).contains(&response.probability) {
        return Err(ScoringError::MalformedResponse(format!(
            "probability {} is outside [0, 1]",
            response.probability
        )));
    }

    if !response.credit_score.is_finite() {
        return Err(ScoringError::MalformedResponse(
            "credit_score is not a finite number".to_string(),
        ));
    }

    let (threshold, threshold_source) = match response.threshold {
        Some(t) if (0.0..=1.0).contains(&t) => (t, ThresholdSource::Reported),
        Some(t) => {
            return Err(ScoringError::MalformedResponse(format!(
                "threshold {t} is outside [0, 1]"
            )));
        }
        None => (DEFAULT_THRESHOLD, ThresholdSource::Default),
    };

    let (decision_label, severity) = match decision {
        Decision::Approve => ("APPROVED", Severity::LowRisk),
        Decision::Reject => ("REJECTED", Severity::HighRisk),
    };

    Ok(PresentationModel {
        decision,
        decision_label,
        severity,
        gauge: Gauge::new(response.probability),
        message: response.message.clone(),
        reasons: response.reasons.clone(),
        summary: SummaryMetrics {
            credit_score: response.credit_score,
            threshold_percent: threshold * 100.0,
            threshold_source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, probability: f64) -> ScoringResponse {
        ScoringResponse {
            status: status.to_string(),
            probability,
            credit_score: 720.0,
            threshold: Some(0.15),
            message: "ok".to_string(),
            reasons: Vec::new(),
        }
    }

    #[test]
    fn approve_maps_to_low_risk_banner() {
        let model = interpret(&response("APPROVE", 0.05)).unwrap();
        assert_eq!(model.decision_label, "APPROVED");
        assert_eq!(model.severity, Severity::LowRisk);
        assert!(model.reasons.is_empty());
        assert_eq!(model.gauge.position, 0.05);
        assert_eq!(model.gauge.band, GaugeBand::Low);
        assert_eq!(model.summary.credit_score, 720.0);
        assert!((model.summary.threshold_percent - 15.0).abs() < 1e-9);
        assert_eq!(model.summary.threshold_source, ThresholdSource::Reported);
    }

    #[test]
    fn reject_is_high_risk_however_close_to_threshold() {
        let model = interpret(&response("REJECT", 0.62)).unwrap();
        assert_eq!(model.decision_label, "REJECTED");
        assert_eq!(model.severity, Severity::HighRisk);
        assert_eq!(model.gauge.band, GaugeBand::Medium);

        let borderline = interpret(&response("REJECT", 0.1501)).unwrap();
        assert_eq!(borderline.severity, Severity::HighRisk);
    }

    #[test]
    fn out_of_range_probability_is_malformed() {
        for p in [1.4, -0.01, f64::NAN] {
            let err = interpret(&response("APPROVE", p)).unwrap_err();
            assert!(matches!(err, ScoringError::MalformedResponse(_)), "p={p}");
        }
    }

    #[test]
    fn unknown_status_is_malformed() {
        let err = interpret(&response("MAYBE", 0.2)).unwrap_err();
        assert_eq!(
            err,
            ScoringError::MalformedResponse("unknown status 'MAYBE'".to_string())
        );
    }

    #[test]
    fn missing_threshold_falls_back_to_documented_default() {
        let mut resp = response("REJECT", 0.95);
        resp.threshold = None;
        let model = interpret(&resp).unwrap();
        assert!((model.summary.threshold_percent - 15.0).abs() < 1e-9);
        assert_eq!(model.summary.threshold_source, ThresholdSource::Default);

        resp.threshold = Some(3.0);
        assert!(interpret(&resp).is_err());
    }

    #[test]
    fn reasons_are_kept_verbatim_and_in_order() {
        let mut resp = response("REJECT", 0.7);
        resp.reasons = vec!["short employment".into(), "high debt".into(), "short employment".into()];
        let model = interpret(&resp).unwrap();
        assert_eq!(model.reasons, resp.reasons);
        assert_eq!(model.gauge.band, GaugeBand::High);
    }

    #[test]
    fn gauge_colour_runs_green_amber_red() {
        assert_eq!(gauge_rgb(0.0), GREEN);
        assert_eq!(gauge_rgb(0.5), AMBER);
        assert_eq!(gauge_rgb(1.0), RED);
        assert_eq!(gauge_rgb(f64::NAN), GREEN);
    }

    #[test]
    fn band_edges() {
        assert_eq!(GaugeBand::for_position(0.0), GaugeBand::Low);
        assert_eq!(GaugeBand::for_position(1.0 / 3.0), GaugeBand::Medium);
        assert_eq!(GaugeBand::for_position(2.0 / 3.0), GaugeBand::High);
        assert_eq!(GaugeBand::for_position(1.0), GaugeBand::High);
    }
}
