//! The contract-creation wizard: five step surfaces over one `Stepper`.
//!
//! The stepper owns the index and the accumulated draft; this screen owns the
//! per-step form state and builds the validate-and-merge transition for
//! whichever step is being left. Navigation is awaited inline by the event
//! loop, so a pending transition can never overlap another one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::Config;
use crate::contract::ContractDraft;
use crate::stepper::{FieldError, Stepper};
use crate::ui::centered_rect;

pub mod steps;

use steps::contract_amount::ContractAmountStep;
use steps::contract_type::ContractTypeStep;
use steps::payment_terms::PaymentTermsStep;
use steps::project_details::ProjectDetailsStep;

/// Step titles, in wizard order.
pub const STEP_TITLES: [&str; 5] = [
    "Contract type",
    "Project details",
    "Contract amount",
    "Payment terms",
    "Review",
];

/// Step identity, dispatched from the stepper's index. The stepper itself
/// stays agnostic to what each step renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ContractType,
    ProjectDetails,
    ContractAmount,
    PaymentTerms,
    Review,
}

impl WizardStep {
    fn from_index(ix: usize) -> WizardStep {
        match ix {
            0 => WizardStep::ContractType,
            1 => WizardStep::ProjectDetails,
            2 => WizardStep::ContractAmount,
            3 => WizardStep::PaymentTerms,
            _ => WizardStep::Review,
        }
    }
}

/// What a key press did to the wizard.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// Still running
    Continue,
    /// "Done" confirmed on the review step
    Completed(ContractDraft),
    /// Cancelled from the first step
    Cancelled,
}

pub struct WizardScreen {
    pub(crate) stepper: Stepper<ContractDraft>,
    pub(crate) contract_type_step: ContractTypeStep,
    pub(crate) project_details_step: ProjectDetailsStep,
    pub(crate) contract_amount_step: ContractAmountStep,
    pub(crate) payment_terms_step: PaymentTermsStep,
    /// Validation messages from the last failed advance
    pub(crate) errors: Vec<FieldError>,
    /// Live draft JSON side panel (Ctrl+J)
    pub(crate) show_draft: bool,
}

impl WizardScreen {
    pub fn new(config: &Config) -> Self {
        let today = chrono::Local::now().date_naive();
        let default_end = today + chrono::Duration::days(config.defaults.duration_days.max(0));

        Self {
            stepper: Stepper::new(STEP_TITLES.len()).with_titles(STEP_TITLES),
            contract_type_step: ContractTypeStep::new(config.default_contract_type()),
            project_details_step: ProjectDetailsStep::new(today, default_end),
            contract_amount_step: ContractAmountStep::new(config.default_currency()),
            payment_terms_step: PaymentTermsStep::new(),
            errors: Vec::new(),
            show_draft: false,
        }
    }

    pub fn active_step(&self) -> WizardStep {
        WizardStep::from_index(self.stepper.step().unwrap_or(0))
    }

    /// Route a key press. Enter advances (except inside the description
    /// textarea, where it inserts a newline and Ctrl+N advances instead),
    /// Esc goes back or cancels, Tab cycles fields.
    pub async fn handle_key(&mut self, key: KeyEvent) -> WizardEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('j') => {
                    self.show_draft = !self.show_draft;
                    return WizardEvent::Continue;
                }
                KeyCode::Char('n') => return self.next().await,
                _ => return WizardEvent::Continue,
            }
        }

        match key.code {
            KeyCode::Esc => self.back(),
            KeyCode::Tab => {
                self.focus_next_field();
                WizardEvent::Continue
            }
            KeyCode::BackTab => {
                self.focus_prev_field();
                WizardEvent::Continue
            }
            KeyCode::Enter if !self.enter_belongs_to_form() => self.next().await,
            code => {
                self.forward_to_active_step(code);
                WizardEvent::Continue
            }
        }
    }

    fn enter_belongs_to_form(&self) -> bool {
        self.active_step() == WizardStep::ProjectDetails
            && self.project_details_step.text_area_focused()
    }

    /// Run the active step's transition and advance on success. On the
    /// review step a successful advance completes the wizard.
    async fn next(&mut self) -> WizardEvent {
        self.errors.clear();
        let was_last = self.stepper.is_last_step();

        let result = match self.active_step() {
            WizardStep::ContractType => {
                let choice = self.contract_type_step.choice();
                self.stepper
                    .advance_with(move |prior| async move {
                        steps::contract_type::validate_and_merge(choice, prior)
                    })
                    .await
            }
            WizardStep::ProjectDetails => {
                let input = self.project_details_step.input();
                self.stepper
                    .advance_with(move |prior| async move {
                        steps::project_details::validate_and_merge(input, prior)
                    })
                    .await
            }
            WizardStep::ContractAmount => {
                let input = self.contract_amount_step.input();
                self.stepper
                    .advance_with(move |prior| async move {
                        steps::contract_amount::validate_and_merge(input, prior)
                    })
                    .await
            }
            WizardStep::PaymentTerms => {
                let compensation = self.payment_terms_step.input();
                self.stepper
                    .advance_with(move |prior| async move {
                        steps::payment_terms::validate_and_merge(compensation, prior)
                    })
                    .await
            }
            WizardStep::Review => {
                self.stepper
                    .advance_with(|prior| async move { steps::review::finalize(prior) })
                    .await
            }
        };

        match result {
            Ok(()) if was_last => {
                let draft = self.stepper.value().cloned().unwrap_or_default();
                tracing::info!("wizard completed");
                WizardEvent::Completed(draft)
            }
            Ok(()) => {
                tracing::debug!(step = ?self.stepper.step(), "advanced");
                self.seed_active_step();
                WizardEvent::Continue
            }
            Err(err) => {
                tracing::debug!(errors = err.errors.len(), "step validation failed");
                self.errors = err.errors;
                WizardEvent::Continue
            }
        }
    }

    /// Go back one step, or cancel from the first. Back-navigation runs no
    /// transition and merges nothing.
    fn back(&mut self) -> WizardEvent {
        if self.stepper.is_first_step() {
            tracing::info!("wizard cancelled");
            return WizardEvent::Cancelled;
        }
        self.errors.clear();
        self.stepper.retreat();
        tracing::debug!(step = ?self.stepper.step(), "went back");
        self.seed_active_step();
        WizardEvent::Continue
    }

    /// Re-seed the newly active step's form from the accumulated draft so
    /// edits survive navigation in both directions.
    fn seed_active_step(&mut self) {
        let Some(draft) = self.stepper.value().cloned() else {
            return;
        };
        match self.active_step() {
            WizardStep::ContractType => self.contract_type_step.seed_from(&draft),
            WizardStep::ProjectDetails => self.project_details_step.seed_from(&draft),
            WizardStep::ContractAmount => self.contract_amount_step.seed_from(&draft),
            WizardStep::PaymentTerms => self.payment_terms_step.seed_from(&draft),
            WizardStep::Review => {}
        }
    }

    fn focus_next_field(&mut self) {
        match self.active_step() {
            WizardStep::ProjectDetails => self.project_details_step.next_field(),
            WizardStep::ContractAmount => self.contract_amount_step.next_field(),
            _ => {}
        }
    }

    fn focus_prev_field(&mut self) {
        match self.active_step() {
            WizardStep::ProjectDetails => self.project_details_step.prev_field(),
            WizardStep::ContractAmount => self.contract_amount_step.prev_field(),
            _ => {}
        }
    }

    fn forward_to_active_step(&mut self, code: KeyCode) {
        match self.active_step() {
            WizardStep::ContractType => {
                self.contract_type_step.handle_key(code);
            }
            WizardStep::ProjectDetails => {
                self.project_details_step.handle_key(code);
            }
            WizardStep::ContractAmount => {
                self.contract_amount_step.handle_key(code);
            }
            WizardStep::PaymentTerms => {
                self.payment_terms_step.handle_key(code);
            }
            WizardStep::Review => {}
        }
    }

    /// Render the wizard: header strip, step content, validation messages,
    /// footer.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = centered_rect(80, 90, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "Pactdraft",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" New Contract "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let error_height = self.errors.len().min(4) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1),            // Step strip
                Constraint::Length(1),            // Spacer
                Constraint::Min(8),               // Content
                Constraint::Length(error_height), // Validation messages
                Constraint::Length(1),            // Footer
            ])
            .split(inner);

        self.render_step_strip(frame, chunks[0]);

        // Ctrl+J splits the content and shows the live draft on the right
        let content_area = if self.show_draft && self.active_step() != WizardStep::Review {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(40), Constraint::Length(38)])
                .split(chunks[2]);
            self.render_draft_panel(frame, halves[1]);
            halves[0]
        } else {
            chunks[2]
        };

        match self.active_step() {
            WizardStep::ContractType => self.render_contract_type_step(frame, content_area),
            WizardStep::ProjectDetails => self.render_project_details_step(frame, content_area),
            WizardStep::ContractAmount => self.render_contract_amount_step(frame, content_area),
            WizardStep::PaymentTerms => self.render_payment_terms_step(frame, content_area),
            WizardStep::Review => self.render_review_step(frame, content_area),
        }

        self.render_errors(frame, chunks[3]);
        self.render_footer(frame, chunks[4]);
    }

    fn render_step_strip(&self, frame: &mut Frame, area: Rect) {
        let current = self.stepper.step();
        let mut spans = Vec::new();
        for (ix, title) in self.stepper.titles().iter().enumerate() {
            if ix > 0 {
                spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
            }
            let style = match current {
                Some(c) if ix == c => Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
                Some(c) if ix < c => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::DarkGray),
            };
            spans.push(Span::styled(format!("{} {}", ix + 1, title), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }

    fn render_draft_panel(&self, frame: &mut Frame, area: Rect) {
        let json = self
            .stepper
            .value()
            .map_or_else(|| "{}".to_string(), ContractDraft::to_pretty_json);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Draft ");
        let lines: Vec<Line> = json.lines().map(|l| Line::from(l.to_string())).collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_errors(&self, frame: &mut Frame, area: Rect) {
        if self.errors.is_empty() {
            return;
        }
        let lines: Vec<Line> = self
            .errors
            .iter()
            .take(4)
            .map(|e| {
                Line::from(Span::styled(
                    format!("✗ {}", e.message),
                    Style::default().fg(Color::Red),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let back_label = if self.stepper.is_first_step() {
            " cancel  "
        } else {
            " back  "
        };
        let next_label = if self.stepper.is_last_step() {
            " done  "
        } else {
            " next  "
        };

        let mut spans = vec![
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(back_label),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(next_label),
        ];
        if matches!(
            self.active_step(),
            WizardStep::ProjectDetails | WizardStep::ContractAmount
        ) {
            spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" fields  "));
        }
        if self.enter_belongs_to_form() {
            spans.push(Span::styled("Ctrl+N", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(" next  "));
        }
        spans.push(Span::styled("Ctrl+J", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" draft"));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}
