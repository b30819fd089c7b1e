//! Payment terms step: compensation details.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::contract::ContractDraft;
use crate::stepper::ValidationError;
use crate::ui::form_field::FormField;
use crate::ui::wizard::WizardScreen;

pub struct PaymentTermsStep {
    pub compensation: FormField,
}

impl PaymentTermsStep {
    pub fn new() -> Self {
        Self {
            compensation: FormField::text("Enter a description"),
        }
    }

    pub fn input(&self) -> String {
        self.compensation.value()
    }

    pub fn seed_from(&mut self, draft: &ContractDraft) {
        if let Some(ref text) = draft.compensation_description {
            self.compensation.set_value(text);
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        self.compensation.handle_key(key)
    }
}

impl Default for PaymentTermsStep {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate the compensation description and merge it into the draft.
pub fn validate_and_merge(
    compensation: String,
    prior: Option<ContractDraft>,
) -> Result<Option<ContractDraft>, ValidationError> {
    if compensation.trim().is_empty() {
        return Err(ValidationError::field(
            "compensation_description",
            "Compensation description is required.",
        ));
    }

    let mut draft = prior.unwrap_or_default();
    draft.compensation_description = Some(compensation.trim().to_string());
    Ok(Some(draft))
}

impl WizardScreen {
    pub(crate) fn render_payment_terms_step(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Prompt
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Label
                Constraint::Length(1), // Input
                Constraint::Min(0),
            ])
            .split(area);

        let prompt = Paragraph::new(Line::from(Span::styled(
            "What are the compensation details?",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(prompt, chunks[0]);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Description",
                Style::default().fg(Color::Cyan),
            ))),
            chunks[2],
        );
        self.payment_terms_step
            .compensation
            .render(frame, chunks[3], true);
    }
}
