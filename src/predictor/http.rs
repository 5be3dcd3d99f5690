//! Blocking HTTP client for the scoring service.

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::PredictorConfig;
use crate::domain::{ScoringRequest, ScoringResponse};
use crate::error::{AppError, ScoringError};
use crate::predictor::Predictor;

/// Longest slice of an error body we echo back to the user.
const BODY_EXCERPT: usize = 200;

pub struct HttpPredictor {
    client: Client,
    endpoint: Url,
}

impl HttpPredictor {
    pub fn new(config: &PredictorConfig) -> Result<Self, AppError> {
        // No retries and, unless configured, no timeout: one attempt per submit.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
        debug!(endpoint = %self.endpoint, "posting scoring request");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .map_err(|e| ScoringError::Transport(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ScoringError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(%status, "scoring service returned an error status");
            return Err(ScoringError::Transport(format!(
                "scoring service returned status {status}: {}",
                excerpt(&body)
            )));
        }

        serde_json::from_str::<ScoringResponse>(&body)
            .map_err(|e| ScoringError::MalformedResponse(format!("invalid JSON body: {e}")))
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
