//! The remote scoring service, as seen by the client.
//!
//! The controller only talks to the `Predictor` trait; `HttpPredictor` is the
//! production implementation.

use crate::domain::{ScoringRequest, ScoringResponse};
use crate::error::ScoringError;

pub mod http;

pub use http::HttpPredictor;

/// One request in, one response (or failure) out.
///
/// Implementations are called from a worker thread, hence `Send + Sync`.
pub trait Predictor: Send + Sync {
    fn predict(&self, request: &ScoringRequest) -> Result<ScoringResponse, ScoringError>;
}
