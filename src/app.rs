//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration and installs tracing
//! - maps the form into a scoring request
//! - submits it and prints the interpreted decision
//! - writes optional exports

use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use crate::cli::{ApplicationArgs, Command, ScoreArgs};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::telemetry::Sink;

pub mod controller;

use controller::{PresentationState, SubmissionController};

/// Entry point for the `credit` binary.
pub fn run() -> Result<(), AppError> {
    // `credit` and `credit --endpoint URL` behave like `credit tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let config = AppConfig::load()?.with_endpoint(cli.endpoint.as_deref())?;

    let sink = match cli.command {
        Command::Tui => Sink::FileOnly,
        Command::Score(_) | Command::Payload(_) => Sink::Stderr,
    };
    crate::telemetry::init(&config.telemetry, sink)
        .map_err(|e| AppError::new(2, format!("Failed to initialize logging: {e}")))?;
    debug!(endpoint = %config.predictor.endpoint, "configuration loaded");

    match cli.command {
        Command::Score(args) => handle_score(args, &config),
        Command::Payload(args) => handle_payload(&args),
        Command::Tui => crate::tui::run(&config),
    }
}

fn handle_score(args: ScoreArgs, config: &AppConfig) -> Result<(), AppError> {
    let input = if args.interactive {
        crate::cli::prompt::prompt_for_application(&args.application.to_input())?
    } else {
        args.application.to_input()
    };

    println!("{}", crate::report::format_application(&input));
    let advisories = crate::form::advisories(&input);
    if !advisories.is_empty() {
        println!("{}", crate::report::format_advisories(&advisories));
    }

    let predictor = crate::predictor::HttpPredictor::new(&config.predictor)?;
    let mut controller = SubmissionController::new(Arc::new(predictor));
    controller
        .submit(&input)
        .map_err(|e| AppError::new(2, e.to_string()))?;

    controller.wait();
    match controller.state() {
        PresentationState::Settled(settlement) => {
            println!("{}", crate::report::format_presentation(&settlement.presentation));

            if let (Some(path), Some(request)) = (&args.export, controller.last_request()) {
                crate::io::write_result_json(path, request, &settlement.response, &settlement.presentation)?;
                println!("Result written to {}", path.display());
            }
            Ok(())
        }
        PresentationState::Failed(err) => Err(err.clone().into()),
        PresentationState::Idle | PresentationState::Submitting => {
            Err(AppError::new(4, "Scoring request did not settle."))
        }
    }
}

fn handle_payload(args: &ApplicationArgs) -> Result<(), AppError> {
    let request = crate::form::map_to_request(&args.to_input());
    println!("{}", crate::report::format_request(&request));
    Ok(())
}

/// Rewrite argv so `credit` defaults to `credit tui`.
///
/// Rules:
/// - `credit`                          -> `credit tui`
/// - `credit --endpoint URL ...`       -> `credit tui --endpoint URL ...`
/// - `credit --endpoint URL score ...` -> unchanged (global flag before a subcommand)
/// - `credit --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if is_subcommand(&arg1) {
        return argv;
    }

    // Global flags may come before an explicit subcommand.
    if argv[2..].iter().any(|a| is_subcommand(a)) {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

fn is_subcommand(arg: &str) -> bool {
    matches!(arg, "score" | "payload" | "tui")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(args(&["credit"])), args(&["credit", "tui"]));
    }

    #[test]
    fn leading_flag_goes_to_the_tui() {
        assert_eq!(
            rewrite_args(args(&["credit", "--endpoint", "http://x/predict"])),
            args(&["credit", "tui", "--endpoint", "http://x/predict"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        for argv in [
            args(&["credit", "score", "--age", "40"]),
            args(&["credit", "payload"]),
            args(&["credit", "--help"]),
            args(&["credit", "-V"]),
            args(&["credit", "--endpoint", "http://x/predict", "score"]),
            args(&["credit", "--endpoint=http://x/predict", "payload", "--age", "40"]),
        ] {
            assert_eq!(rewrite_args(argv.clone()), argv);
        }
    }

    #[test]
    fn global_flag_before_subcommand_parses() {
        let argv = rewrite_args(args(&["credit", "--endpoint", "http://x/predict", "score", "--age", "40"]));
        let cli = crate::cli::Cli::try_parse_from(argv).unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://x/predict"));
        let Command::Score(score) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(score.application.age, 40);
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(args(&["credit", "--endpoint", "http://x/predict"])));
        assert!(matches!(cli.command, Command::Tui));
        assert_eq!(cli.endpoint.as_deref(), Some("http://x/predict"));
    }
}
