//! Domain types shared by the form, the predictor and the report.
//!
//! This module defines:
//!
//! - the applicant form (`ApplicationInput`) and its closed categorical sets
//! - the wire payloads (`ScoringRequest`, `ScoringResponse`)
//! - the predictor's `Decision`

pub mod types;

pub use types::*;
