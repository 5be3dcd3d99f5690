//! Export a settled scoring run to JSON.
//!
//! The file bundles what was sent, what came back and what was shown, so a
//! decision can be reviewed later without re-running the request.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{ScoringRequest, ScoringResponse};
use crate::error::AppError;
use crate::report::PresentationModel;

/// Schema of an exported result file.
#[derive(Debug, Serialize)]
pub struct ResultFile<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Local>,
    pub request: &'a ScoringRequest,
    pub response: &'a ScoringResponse,
    pub presentation: &'a PresentationModel,
}

/// Write a result JSON file.
pub fn write_result_json(
    path: &Path,
    request: &ScoringRequest,
    response: &ScoringResponse,
    presentation: &PresentationModel,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;

    let result = ResultFile {
        tool: "credit",
        generated_at: Local::now(),
        request,
        response,
        presentation,
    };

    serde_json::to_writer_pretty(file, &result)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;

    Ok(())
}
