//! Interactive application prompt.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompt provides the "run `credit score -i` and answer questions" UX
//!
//! Every question shows its current value; an empty answer keeps it.

use std::io::{self, BufRead, Write};

use crate::domain::{
    ApplicationInput, CreditHistory, Education, FamilyStatus, Gender, HousingType,
};
use crate::error::AppError;
use crate::form::constraints::{MAX_AGE, MAX_YEARS_EMPLOYED, MIN_AGE};
use crate::form::{format_amount, parse_amount};

/// Ask for every field on stdin, starting from `defaults`.
///
/// `q` at any question cancels.
pub fn prompt_for_application(defaults: &ApplicationInput) -> Result<ApplicationInput, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    prompt_with(&mut stdin.lock(), &mut stdout.lock(), defaults)
}

/// Same as [`prompt_for_application`] over arbitrary streams.
pub fn prompt_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    defaults: &ApplicationInput,
) -> Result<ApplicationInput, AppError> {
    let mut p = Prompter { reader, writer };
    let mut input = defaults.clone();

    input.annual_income = p.amount("Annual income", input.annual_income)?;
    input.requested_credit = p.amount("Requested credit", input.requested_credit)?;
    input.monthly_annuity = p.amount("Monthly repayment", input.monthly_annuity)?;
    input.age_years = p.bounded("Age", input.age_years, MIN_AGE, MAX_AGE)?;
    input.years_employed = p.bounded("Years employed", input.years_employed, 0, MAX_YEARS_EMPLOYED)?;
    input.housing_type = p.choice("Housing", &HousingType::ALL, input.housing_type, |h| h.label())?;
    input.family_status = p.choice("Family status", &FamilyStatus::ALL, input.family_status, |s| s.label())?;
    input.credit_history = p.choice("Credit history", &CreditHistory::ALL, input.credit_history, |c| c.label())?;
    input.gender = p.optional_choice("Gender", &Gender::ALL, input.gender, |g| g.label())?;
    input.education = p.optional_choice("Education", &Education::ALL, input.education, |e| e.label())?;

    Ok(input)
}

struct Prompter<'a, R, W> {
    reader: &'a mut R,
    writer: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    /// Print `question`, read one trimmed line. `None` means "keep the current value".
    fn ask(&mut self, question: &str) -> Result<Option<String>, AppError> {
        write!(self.writer, "{question}: ")
            .and_then(|_| self.writer.flush())
            .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let bytes = self
            .reader
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Pass the fields as flags to `credit score` instead.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        if line.is_empty() {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }

    fn say(&mut self, msg: &str) -> Result<(), AppError> {
        writeln!(self.writer, "{msg}").map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))
    }

    fn amount(&mut self, name: &str, current: f64) -> Result<f64, AppError> {
        loop {
            let Some(raw) = self.ask(&format!("{name} [{}]", format_amount(current)))? else {
                return Ok(current);
            };
            match parse_amount(&raw) {
                Some(v) if v > 0.0 => return Ok(v),
                _ => self.say(&format!("Invalid amount: {raw}. Enter a positive number."))?,
            }
        }
    }

    fn bounded(&mut self, name: &str, current: u32, min: u32, max: u32) -> Result<u32, AppError> {
        loop {
            let Some(raw) = self.ask(&format!("{name} ({min}-{max}) [{current}]"))? else {
                return Ok(current);
            };
            match raw.parse::<u32>() {
                Ok(v) if (min..=max).contains(&v) => return Ok(v),
                _ => self.say(&format!("Invalid value: {raw}. Enter a number between {min} and {max}."))?,
            }
        }
    }

    fn choice<T: Copy + PartialEq>(
        &mut self,
        name: &str,
        all: &[T],
        current: T,
        label: impl Fn(T) -> &'static str,
    ) -> Result<T, AppError> {
        self.say(&format!("{name}:"))?;
        for (idx, v) in all.iter().enumerate() {
            self.say(&format!("{:>3}) {}", idx + 1, label(*v)))?;
        }
        loop {
            let Some(raw) = self.ask(&format!("Select 1-{} [{}]", all.len(), label(current)))? else {
                return Ok(current);
            };
            match raw.parse::<usize>() {
                Ok(n) if (1..=all.len()).contains(&n) => return Ok(all[n - 1]),
                _ => self.say(&format!("Invalid choice: {raw}. Enter a number between 1 and {}.", all.len()))?,
            }
        }
    }

    /// Like [`Prompter::choice`], with `0` meaning "not sent".
    fn optional_choice<T: Copy + PartialEq>(
        &mut self,
        name: &str,
        all: &[T],
        current: Option<T>,
        label: impl Fn(T) -> &'static str,
    ) -> Result<Option<T>, AppError> {
        self.say(&format!("{name}:"))?;
        self.say("  0) (not sent)")?;
        for (idx, v) in all.iter().enumerate() {
            self.say(&format!("{:>3}) {}", idx + 1, label(*v)))?;
        }
        let shown = current.map(&label).unwrap_or("not sent");
        loop {
            let Some(raw) = self.ask(&format!("Select 0-{} [{shown}]", all.len()))? else {
                return Ok(current);
            };
            match raw.parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) if n <= all.len() => return Ok(Some(all[n - 1])),
                _ => self.say(&format!("Invalid choice: {raw}. Enter a number between 0 and {}.", all.len()))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str) -> (Result<ApplicationInput, AppError>, String) {
        let mut reader = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = prompt_with(&mut reader, &mut out, &ApplicationInput::default());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_answers_keep_defaults() {
        let (result, out) = run("\n\n\n\n\n\n\n\n\n\n");
        assert_eq!(result.unwrap(), ApplicationInput::default());
        assert!(out.contains("Annual income [600,000,000]"));
        assert!(out.contains("Select 0-2 [not sent]"));
    }

    #[test]
    fn invalid_answers_are_asked_again() {
        let answers = "lots\n120,000,000\n\n\n17\n40\n\n9\n2\n\n4\n1\n2\n";
        let (result, out) = run(answers);
        let input = result.unwrap();
        assert_eq!(input.annual_income, 120_000_000.0);
        assert_eq!(input.age_years, 40);
        assert_eq!(input.housing_type, HousingType::RentedApartment);
        assert_eq!(input.family_status, FamilyStatus::Married);
        assert_eq!(input.credit_history, CreditHistory::Poor);
        assert_eq!(input.gender, Some(Gender::Male));
        assert_eq!(input.education, Some(Education::University));
        assert!(out.contains("Invalid amount: lots"));
        assert!(out.contains("Invalid value: 17"));
        assert!(out.contains("Invalid choice: 9"));
    }

    #[test]
    fn q_cancels_and_eof_fails() {
        let (result, _) = run("\nq\n");
        assert_eq!(result.unwrap_err().exit_code(), 2);
        let (result, _) = run("\n\n");
        assert!(result.unwrap_err().to_string().contains("No input received"));
    }
}
