//! Ratatui-based terminal UI.
//!
//! The TUI shows the application form on the left and the latest decision on
//! the right. Submission runs in the background, so the form stays responsive
//! while a request is in flight.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::info;

use crate::app::controller::{PresentationState, SubmissionController};
use crate::config::AppConfig;
use crate::domain::{ApplicationInput, Education, Gender, cycle_optional};
use crate::error::AppError;
use crate::form::constraints::{MAX_AGE, MAX_YEARS_EMPLOYED, MIN_AGE};
use crate::form::{
    Field, ValidationAdvisory, advisories, advisories_for_amounts, age_advisory, check_constraints, compute_loan_term,
    format_amount, parse_amount,
};
use crate::predictor::{HttpPredictor, Predictor};
use crate::report::{PresentationModel, ThresholdSource};

mod gauge_chart;

use gauge_chart::GaugeDial;

const DEBUG_DIR: &str = "debug";
/// Index of the "Submit" row, just after the last field.
const SUBMIT_ROW: usize = Field::ALL.len();

/// Start the TUI.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let predictor = HttpPredictor::new(&config.predictor)?;
    info!(endpoint = %predictor.endpoint(), "starting tui");

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(Arc::new(predictor), PathBuf::from(DEBUG_DIR));
    app.status = format!("Scoring endpoint: {}", config.predictor.endpoint);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    input: ApplicationInput,
    selected: usize,
    /// Text typed into the selected numeric field, if editing.
    edit_buffer: Option<String>,
    advisories: Vec<ValidationAdvisory>,
    status: String,
    controller: SubmissionController,
    debug_dir: PathBuf,
}

impl App {
    fn new(predictor: Arc<dyn Predictor>, debug_dir: PathBuf) -> Self {
        let input = ApplicationInput::default();
        Self {
            advisories: advisories(&input),
            input,
            selected: 0,
            edit_buffer: None,
            status: String::new(),
            controller: SubmissionController::new(predictor),
            debug_dir,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.tick() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Pick up a finished request. Returns `true` when the screen must change.
    fn tick(&mut self) -> bool {
        if !self.controller.poll() {
            return false;
        }
        self.status = match self.controller.state() {
            PresentationState::Settled(s) => format!(
                "{} ({:.1}% risk)",
                s.presentation.decision_label,
                s.presentation.gauge.percent()
            ),
            PresentationState::Failed(err) => format!("Request failed: {err}"),
            PresentationState::Idle | PresentationState::Submitting => String::new(),
        };
        true
    }

    fn selected_field(&self) -> Option<Field> {
        Field::ALL.get(self.selected).copied()
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if self.edit_buffer.is_some() {
            self.handle_edit(code);
            return Ok(false);
        }

        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected < SUBMIT_ROW {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => match self.selected_field() {
                None => self.submit(),
                Some(field) if field.is_numeric() => {
                    self.edit_buffer = Some(String::new());
                    self.status = format!("Editing {}. Enter to apply, Esc to cancel.", field.label());
                    self.refresh_advisories();
                }
                Some(_) => self.adjust_field(1),
            },
            KeyCode::Char('s') => self.submit(),
            KeyCode::Char('d') => {
                match crate::debug::write_debug_bundle(&self.debug_dir, &self.input, &self.controller) {
                    Ok(path) => {
                        self.status = format!("Wrote debug bundle: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Debug write failed: {err}");
                    }
                }
            }
            _ => {}
        }

        Ok(false)
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(field) = self.selected_field() else {
            self.edit_buffer = None;
            return;
        };
        let Some(buffer) = self.edit_buffer.as_mut() else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.edit_buffer = None;
                self.status = format!("{} edit canceled.", field.label());
            }
            KeyCode::Enter => {
                let raw = buffer.clone();
                self.edit_buffer = None;
                self.apply_typed(field, &raw);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                let accepted = c.is_ascii_digit() || (field.is_amount() && matches!(c, ',' | '.'));
                if accepted {
                    buffer.push(c);
                }
            }
            _ => {}
        }
        self.refresh_advisories();
    }

    fn apply_typed(&mut self, field: Field, raw: &str) {
        if raw.trim().is_empty() {
            self.status = format!("{} unchanged.", field.label());
            return;
        }
        match field {
            Field::AnnualIncome | Field::RequestedCredit | Field::MonthlyAnnuity => {
                let Some(value) = parse_amount(raw) else {
                    self.status = format!("Invalid amount '{raw}'.");
                    return;
                };
                match field {
                    Field::AnnualIncome => self.input.annual_income = value,
                    Field::RequestedCredit => self.input.requested_credit = value,
                    _ => self.input.monthly_annuity = value,
                }
            }
            Field::Age | Field::YearsEmployed => {
                let Ok(value) = raw.trim().parse::<u32>() else {
                    self.status = format!("Invalid number '{raw}'.");
                    return;
                };
                if field == Field::Age {
                    self.input.age_years = value;
                } else {
                    self.input.years_employed = value;
                }
            }
            _ => return,
        }
        self.status = format!("{} updated.", field.label());
    }

    fn adjust_field(&mut self, delta: i32) {
        let Some(field) = self.selected_field() else {
            return;
        };
        let input = &mut self.input;
        match field {
            Field::AnnualIncome => input.annual_income = step_amount(input.annual_income, 10_000_000.0, delta),
            Field::RequestedCredit => {
                input.requested_credit = step_amount(input.requested_credit, 10_000_000.0, delta)
            }
            Field::MonthlyAnnuity => input.monthly_annuity = step_amount(input.monthly_annuity, 1_000_000.0, delta),
            Field::Age => input.age_years = step_bounded(input.age_years, delta, MIN_AGE, MAX_AGE),
            Field::YearsEmployed => {
                input.years_employed = step_bounded(input.years_employed, delta, 0, MAX_YEARS_EMPLOYED)
            }
            Field::HousingType => {
                input.housing_type = if delta >= 0 { input.housing_type.next() } else { input.housing_type.prev() }
            }
            Field::FamilyStatus => {
                input.family_status = if delta >= 0 { input.family_status.next() } else { input.family_status.prev() }
            }
            Field::CreditHistory => {
                input.credit_history =
                    if delta >= 0 { input.credit_history.next() } else { input.credit_history.prev() }
            }
            Field::Gender => input.gender = cycle_optional(&Gender::ALL, input.gender, delta),
            Field::Education => input.education = cycle_optional(&Education::ALL, input.education, delta),
        }
        self.refresh_advisories();
    }

    /// Committed value of `field`, or what is typed into it while it is being edited.
    fn live_value<T>(&self, field: Field, committed: T, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        match (&self.edit_buffer, self.selected_field()) {
            (Some(buffer), Some(editing)) if editing == field => parse(buffer.as_str()),
            _ => Some(committed),
        }
    }

    fn live_amount(&self, field: Field, committed: f64) -> Option<f64> {
        self.live_value(field, committed, parse_amount)
    }

    /// Recompute advisories, reading the field being edited from the buffer.
    fn refresh_advisories(&mut self) {
        let mut found = advisories_for_amounts(
            self.live_amount(Field::AnnualIncome, self.input.annual_income),
            self.live_amount(Field::RequestedCredit, self.input.requested_credit),
            self.live_amount(Field::MonthlyAnnuity, self.input.monthly_annuity),
        );
        found.extend(age_advisory(self.live_value(Field::Age, self.input.age_years, |raw| {
            raw.trim().parse::<u32>().ok()
        })));
        self.advisories = found;
    }

    fn submit(&mut self) {
        match self.controller.submit(&self.input) {
            Ok(()) => {
                self.status = "Submitting application...".to_string();
            }
            Err(err) => {
                self.status = format!("Not submitted: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        self.draw_form(frame, body[0]);
        self.draw_result(frame, body[1]);

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("credit", Style::default().fg(Color::Cyan)),
            Span::raw(" | loan application scoring | "),
            Span::styled(
                format!("state: {} | attempts: {}", self.controller.state().label(), self.controller.attempts()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let notes = self.form_notes();
        let notes_height = (notes.len() as u16 + 2).min(area.height / 2).max(3);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(notes_height)])
            .split(area);

        let mut items: Vec<ListItem> = Field::ALL
            .iter()
            .enumerate()
            .map(|(idx, &field)| {
                let value = match (&self.edit_buffer, idx == self.selected) {
                    (Some(buffer), true) => format!("{buffer}_"),
                    _ => field_value(&self.input, field),
                };
                ListItem::new(format!("{:<18} {value}", field.label()))
            })
            .collect();

        let submit_style = if self.controller.is_in_flight() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        };
        let submit_label = if self.controller.is_in_flight() { "[ Submitting... ]" } else { "[ Submit ]" };
        items.push(ListItem::new(Span::styled(submit_label, submit_style)));

        let list = List::new(items)
            .block(Block::default().title("Application").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let p = Paragraph::new(Text::from(notes))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Checks").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn form_notes(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let term = compute_loan_term(
            self.live_amount(Field::RequestedCredit, self.input.requested_credit),
            self.live_amount(Field::MonthlyAnnuity, self.input.monthly_annuity),
        );
        lines.push(Line::from(Span::styled(
            match term {
                Some(years) => format!("Implied term: {years:.1} years"),
                None => "Implied term: -".to_string(),
            },
            Style::default().fg(Color::Gray),
        )));
        if let Err(issues) = check_constraints(&self.input) {
            for issue in issues {
                lines.push(Line::from(Span::styled(issue.to_string(), Style::default().fg(Color::Red))));
            }
        }
        for a in &self.advisories {
            lines.push(Line::from(Span::styled(format!("! {a}"), Style::default().fg(Color::Yellow))));
        }
        lines
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Decision").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match self.controller.state() {
            PresentationState::Idle => {
                let msg = Paragraph::new("Fill in the form and press s to submit.")
                    .style(Style::default().fg(Color::Gray));
                frame.render_widget(msg, inner);
            }
            PresentationState::Submitting => {
                let msg = Paragraph::new("Waiting for the scoring service...")
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, inner);
            }
            PresentationState::Failed(err) => {
                let msg = Paragraph::new(err.to_string())
                    .wrap(Wrap { trim: true })
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
                frame.render_widget(msg, inner);
            }
            PresentationState::Settled(s) => draw_presentation(frame, inner, &s.presentation),
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  s submit  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_presentation(frame: &mut ratatui::Frame<'_>, area: Rect, model: &PresentationModel) {
    let (r, g, b) = model.severity.rgb();
    let severity_color = Color::Rgb(r, g, b);
    let (gr, gg, gb) = model.gauge.rgb();

    let mut details = vec![
        Line::from(Span::styled(
            format!(
                "Risk probability: {:.1}% ({} band)",
                model.gauge.percent(),
                model.gauge.band.label()
            ),
            Style::default().fg(Color::Rgb(gr, gg, gb)),
        )),
        Line::from(""),
        Line::from(Span::styled("Main factors:", Style::default().add_modifier(Modifier::BOLD))),
    ];
    if model.reasons.is_empty() {
        details.push(Line::from(Span::styled(
            "  no explanation available",
            Style::default().fg(Color::Gray),
        )));
    }
    for reason in &model.reasons {
        details.push(Line::from(format!("  - {reason}")));
    }
    details.push(Line::from(""));
    let marker = match model.summary.threshold_source {
        ThresholdSource::Reported => "",
        ThresholdSource::Default => " (default)",
    };
    details.push(Line::from(Span::styled(
        format!(
            "Credit score: {:.0} | Risk threshold: {:.1}%{marker}",
            model.summary.credit_score, model.summary.threshold_percent
        ),
        Style::default().fg(Color::Gray),
    )));

    let details_height = (details.len() as u16 + 1).min(area.height.saturating_sub(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(details_height),
        ])
        .split(area);

    let mut banner = vec![Line::from(Span::styled(
        model.decision_label,
        Style::default().fg(severity_color).add_modifier(Modifier::BOLD),
    ))];
    if !model.message.is_empty() {
        banner.push(Line::from(model.message.clone()));
    }
    frame.render_widget(Paragraph::new(Text::from(banner)), chunks[0]);

    let dial = chunks[1];
    if dial.width >= 24 && dial.height >= 8 {
        frame.render_widget(GaugeDial { gauge: &model.gauge }, dial);
    } else {
        let ascii = crate::plot::render_ascii_gauge(&model.gauge, usize::from(dial.width.max(12)));
        frame.render_widget(Paragraph::new(ascii), dial);
    }

    frame.render_widget(Paragraph::new(Text::from(details)).wrap(Wrap { trim: false }), chunks[2]);
}

fn field_value(input: &ApplicationInput, field: Field) -> String {
    match field {
        Field::AnnualIncome => format_amount(input.annual_income),
        Field::RequestedCredit => format_amount(input.requested_credit),
        Field::MonthlyAnnuity => format_amount(input.monthly_annuity),
        Field::Age => input.age_years.to_string(),
        Field::YearsEmployed => input.years_employed.to_string(),
        Field::HousingType => format!("‹ {} ›", input.housing_type.label()),
        Field::FamilyStatus => format!("‹ {} ›", input.family_status.label()),
        Field::CreditHistory => format!("‹ {} ›", input.credit_history.label()),
        Field::Gender => format!("‹ {} ›", input.gender.map(|g| g.label()).unwrap_or("not sent")),
        Field::Education => format!("‹ {} ›", input.education.map(|e| e.label()).unwrap_or("not sent")),
    }
}

fn step_amount(current: f64, step: f64, delta: i32) -> f64 {
    let next = current + step * f64::from(delta);
    if next < step { step } else { next }
}

fn step_bounded(current: u32, delta: i32, min: u32, max: u32) -> u32 {
    let next = i64::from(current) + i64::from(delta);
    next.clamp(i64::from(min), i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::mpsc::{self, Receiver, Sender};

    use crate::domain::{ScoringRequest, ScoringResponse};
    use crate::error::ScoringError;

    /// Holds each call until the test sends a release token.
    struct Gated {
        release: Mutex<Receiver<()>>,
    }

    impl Predictor for Gated {
        fn predict(&self, _request: &ScoringRequest) -> Result<ScoringResponse, ScoringError> {
            let _ = self.release.lock().map(|rx| rx.recv());
            Ok(ScoringResponse {
                status: "APPROVE".to_string(),
                probability: 0.04,
                credit_score: 780.0,
                threshold: Some(0.15),
                message: "Low risk.".to_string(),
                reasons: Vec::new(),
            })
        }
    }

    fn app() -> (App, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let predictor = Gated {
            release: Mutex::new(rx),
        };
        let dir = std::env::temp_dir().join(format!("credit_tui_test_{}", std::process::id()));
        (App::new(Arc::new(predictor), dir), tx)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for &k in keys {
            assert!(!app.handle_key(k).unwrap());
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, &[KeyCode::Char(c)]);
        }
    }

    #[test]
    fn advisories_follow_the_edit_buffer() {
        let (mut app, _tx) = app();
        assert!(app.advisories.is_empty());

        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.selected_field(), Some(Field::MonthlyAnnuity));

        // Empty buffer: no repayment figure yet, so no term warning.
        assert!(app.advisories.is_empty());
        type_text(&mut app, "1,000,000");
        assert!(matches!(
            app.advisories.as_slice(),
            [ValidationAdvisory::LongLoanTerm { .. }]
        ));

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.input.monthly_annuity, 1_000_000.0);
        assert_eq!(app.advisories.len(), 1);
    }

    fn note_text(app: &App) -> Vec<String> {
        app.form_notes()
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn implied_term_follows_the_edit_buffer() {
        let (mut app, _tx) = app();
        assert_eq!(note_text(&app)[0], "Implied term: 3.3 years");

        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(note_text(&app)[0], "Implied term: -");
        type_text(&mut app, "1,000,000");
        let notes = note_text(&app);
        assert_eq!(notes[0], "Implied term: 83.3 years");
        assert!(notes.iter().any(|n| n.contains("83.3 years are required")));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(note_text(&app)[0], "Implied term: 3.3 years");
    }

    #[test]
    fn age_window_warning_follows_typing_and_arrows() {
        let (mut app, _tx) = app();
        app.selected = 3;
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "65");
        assert_eq!(app.advisories, vec![ValidationAdvisory::AgeOutsideWindow { age: 65 }]);
        press(&mut app, &[KeyCode::Backspace, KeyCode::Backspace]);
        assert!(app.advisories.is_empty());
        type_text(&mut app, "45");
        assert!(app.advisories.is_empty());
        press(&mut app, &[KeyCode::Esc]);
        assert!(app.advisories.is_empty());

        app.input.age_years = 20;
        press(&mut app, &[KeyCode::Left]);
        assert_eq!(app.input.age_years, 19);
        assert_eq!(app.advisories, vec![ValidationAdvisory::AgeOutsideWindow { age: 19 }]);
    }

    #[test]
    fn escape_discards_the_buffer() {
        let (mut app, _tx) = app();
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "5");
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.input.annual_income, ApplicationInput::default().annual_income);
        assert!(app.edit_buffer.is_none());
        assert!(app.advisories.is_empty());
    }

    #[test]
    fn arrows_clamp_numbers_and_cycle_choices() {
        let (mut app, _tx) = app();
        app.selected = 3;
        app.input.age_years = MAX_AGE;
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.input.age_years, MAX_AGE);

        app.selected = 8;
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.input.gender, Some(Gender::Male));
        press(&mut app, &[KeyCode::Left, KeyCode::Left]);
        assert_eq!(app.input.gender, Some(Gender::Female));
    }

    #[test]
    fn second_submit_is_refused_while_in_flight() {
        let (mut app, tx) = app();
        press(&mut app, &[KeyCode::Char('s')]);
        assert!(app.controller.is_in_flight());

        press(&mut app, &[KeyCode::Char('s')]);
        assert!(app.status.contains("already in flight"));
        assert_eq!(app.controller.attempts(), 1);

        tx.send(()).unwrap();
        app.controller.wait();
        assert!(matches!(app.controller.state(), PresentationState::Settled(_)));
    }

    #[test]
    fn typed_out_of_range_age_blocks_submission() {
        let (mut app, _tx) = app();
        app.selected = 3;
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "90");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.input.age_years, 90);

        app.selected = SUBMIT_ROW;
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.status.starts_with("Not submitted: invalid application: Age"));
        assert_eq!(app.controller.attempts(), 0);
    }

    #[test]
    fn q_quits_only_outside_editing() {
        let (mut app, _tx) = app();
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('q')]);
        assert!(app.edit_buffer.is_some());
        press(&mut app, &[KeyCode::Esc]);
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn steps_stay_positive() {
        assert_eq!(step_amount(5_000_000.0, 10_000_000.0, -1), 10_000_000.0);
        assert_eq!(step_bounded(0, -1, 0, 50), 0);
    }
}
