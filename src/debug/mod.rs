//! Debug bundle writer for inspecting what the client sent and received.

use std::fmt::Write as _;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::controller::{PresentationState, SubmissionController};
use crate::domain::ApplicationInput;
use crate::error::AppError;
use crate::form::{advisories, check_constraints, map_to_request};
use crate::report::format_request;

/// Write a Markdown snapshot of the current session into `dir`.
pub fn write_debug_bundle(
    dir: &Path,
    input: &ApplicationInput,
    controller: &SubmissionController,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("credit_debug_{ts}_{}.md", controller.attempts()));

    let body = render_bundle(input, controller)
        .map_err(|e| AppError::new(4, format!("Failed to render debug bundle: {e}")))?;
    fs::write(&path, body).map_err(|e| AppError::new(4, format!("Failed to write debug file: {e}")))?;

    Ok(path)
}

fn render_bundle(input: &ApplicationInput, controller: &SubmissionController) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "# credit debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- state: {}", controller.state().label())?;
    writeln!(out, "- attempts: {}", controller.attempts())?;
    writeln!(out, "- in_flight: {}", controller.is_in_flight())?;

    writeln!(out, "\n## Form")?;
    writeln!(out, "```\n{input:#?}\n```")?;

    writeln!(out, "\n## Constraints")?;
    match check_constraints(input) {
        Ok(()) => writeln!(out, "all bounds satisfied")?,
        Err(issues) => {
            for issue in issues {
                writeln!(out, "- {issue}")?;
            }
        }
    }

    writeln!(out, "\n## Advisories")?;
    let found = advisories(input);
    if found.is_empty() {
        writeln!(out, "none")?;
    }
    for a in found {
        writeln!(out, "- {a}")?;
    }

    writeln!(out, "\n## Payload for current form")?;
    writeln!(out, "```json\n{}\n```", format_request(&map_to_request(input)))?;

    if let Some(sent) = controller.last_request() {
        writeln!(out, "\n## Last submitted payload")?;
        writeln!(out, "```json\n{}\n```", format_request(sent))?;
    }

    writeln!(out, "\n## Result")?;
    match controller.state() {
        PresentationState::Idle => writeln!(out, "no submission yet")?,
        PresentationState::Submitting => writeln!(out, "request in flight")?,
        PresentationState::Settled(s) => {
            let raw = serde_json::to_string_pretty(&s.response).unwrap_or_default();
            writeln!(out, "```json\n{raw}\n```")?;
            writeln!(
                out,
                "- decision: {} ({:.1}% risk, {} band)",
                s.presentation.decision_label,
                s.presentation.gauge.percent(),
                s.presentation.gauge.band.label()
            )?;
        }
        PresentationState::Failed(err) => writeln!(out, "failed: {err}")?,
    }

    Ok(out)
}
