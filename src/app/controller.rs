//! Submission lifecycle shared by the CLI and TUI front-ends.
//!
//! `Idle -> Submitting -> Settled | Failed`, with at most one request in flight.
//! The outbound call runs on a worker thread so the TUI keeps redrawing; the
//! CLI simply blocks on `wait`.

use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{info, warn};

use crate::domain::{ApplicationInput, ScoringRequest, ScoringResponse};
use crate::error::ScoringError;
use crate::form::{FieldIssue, check_constraints, map_to_request};
use crate::predictor::Predictor;
use crate::report::{PresentationModel, interpret};

type Outcome = Result<ScoringResponse, ScoringError>;

/// A response that interpreted cleanly.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub response: ScoringResponse,
    pub presentation: PresentationModel,
}

#[derive(Debug, Clone)]
pub enum PresentationState {
    Idle,
    Submitting,
    Settled(Settlement),
    Failed(ScoringError),
}

impl PresentationState {
    pub fn label(&self) -> &'static str {
        match self {
            PresentationState::Idle => "idle",
            PresentationState::Submitting => "submitting",
            PresentationState::Settled(_) => "settled",
            PresentationState::Failed(_) => "failed",
        }
    }
}

/// Why `submit` refused to start a request. The state is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitRejected {
    /// A request is already outstanding.
    InFlight,
    /// The form violates its hard bounds.
    InvalidInput(Vec<FieldIssue>),
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::InFlight => write!(f, "a scoring request is already in flight"),
            SubmitRejected::InvalidInput(issues) => {
                let parts: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                write!(f, "invalid application: {}", parts.join("; "))
            }
        }
    }
}

impl std::error::Error for SubmitRejected {}

pub struct SubmissionController {
    predictor: Arc<dyn Predictor>,
    state: PresentationState,
    in_flight: Option<Receiver<Outcome>>,
    last_request: Option<ScoringRequest>,
    attempts: u64,
}

impl SubmissionController {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            state: PresentationState::Idle,
            in_flight: None,
            last_request: None,
            attempts: 0,
        }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Payload of the most recent submission.
    pub fn last_request(&self) -> Option<&ScoringRequest> {
        self.last_request.as_ref()
    }

    /// Number of requests issued so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Start a scoring request for `input`.
    ///
    /// Issues exactly one outbound call. Rejected (not queued) while another
    /// request is outstanding.
    pub fn submit(&mut self, input: &ApplicationInput) -> Result<(), SubmitRejected> {
        if self.in_flight.is_some() {
            warn!("submit ignored: request already in flight");
            return Err(SubmitRejected::InFlight);
        }
        check_constraints(input).map_err(SubmitRejected::InvalidInput)?;

        let request = map_to_request(input);
        let (tx, rx) = mpsc::channel();
        let predictor = Arc::clone(&self.predictor);
        let outbound = request.clone();

        self.attempts += 1;
        info!(attempt = self.attempts, "submitting scoring request");

        thread::spawn(move || {
            let outcome = predictor.predict(&outbound);
            // The controller may have been dropped; nothing left to report to.
            let _ = tx.send(outcome);
        });

        self.last_request = Some(request);
        self.in_flight = Some(rx);
        self.state = PresentationState::Submitting;
        Ok(())
    }

    /// Non-blocking check for a result. Returns `true` when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.in_flight else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(worker_lost()),
        };
        self.settle(outcome);
        true
    }

    /// Block until the outstanding request settles.
    pub fn wait(&mut self) -> &PresentationState {
        if let Some(rx) = &self.in_flight {
            let outcome = rx.recv().unwrap_or_else(|_| Err(worker_lost()));
            self.settle(outcome);
        }
        &self.state
    }

    fn settle(&mut self, outcome: Outcome) {
        self.in_flight = None;
        self.state = match outcome.and_then(|response| {
            interpret(&response).map(|presentation| Settlement {
                response,
                presentation,
            })
        }) {
            Ok(settlement) => {
                info!(
                    decision = %settlement.presentation.decision,
                    probability = settlement.presentation.gauge.position,
                    "scoring request settled"
                );
                PresentationState::Settled(settlement)
            }
            Err(err) => {
                warn!(error = %err, "scoring request failed");
                PresentationState::Failed(err)
            }
        };
    }
}

fn worker_lost() -> ScoringError {
    ScoringError::Transport("scoring worker exited without a result".to_string())
}
