//! Contract type selection step: three cards, one choice.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::contract::{ContractDraft, ContractType};
use crate::stepper::ValidationError;
use crate::ui::wizard::WizardScreen;

pub struct ContractTypeStep {
    pub selected: usize,
}

impl ContractTypeStep {
    pub fn new(default: ContractType) -> Self {
        let selected = ContractType::all()
            .iter()
            .position(|t| t == &default)
            .unwrap_or(0);
        Self { selected }
    }

    pub fn choice(&self) -> ContractType {
        ContractType::all()[self.selected]
    }

    /// Re-select the card matching the draft, so back-navigation shows the
    /// earlier choice.
    pub fn seed_from(&mut self, draft: &ContractDraft) {
        if let Some(t) = draft.contract_type {
            if let Some(ix) = ContractType::all().iter().position(|c| c == &t) {
                self.selected = ix;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let count = ContractType::all().len();
        match key {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(count - 1);
                true
            }
            _ => false,
        }
    }
}

/// Merge the chosen contract type into the draft. Selection can't be
/// invalid, so this transition always succeeds.
pub fn validate_and_merge(
    choice: ContractType,
    prior: Option<ContractDraft>,
) -> Result<Option<ContractDraft>, ValidationError> {
    let mut draft = prior.unwrap_or_default();
    draft.contract_type = Some(choice);
    Ok(Some(draft))
}

impl WizardScreen {
    pub(crate) fn render_contract_type_step(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Prompt
                Constraint::Length(1), // Spacer
                Constraint::Min(7),    // Cards
            ])
            .split(area);

        let prompt = Paragraph::new(Line::from(Span::styled(
            "What type of contractor's contract do you need?",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(prompt, chunks[0]);

        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(chunks[2]);

        for (ix, contract_type) in ContractType::all().iter().enumerate() {
            let is_selected = ix == self.contract_type_step.selected;
            let border_style = if is_selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let card = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(
                    format!(" {} ", contract_type.label()),
                    if is_selected {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    },
                ));
            let inner = card.inner(card_areas[ix]);
            frame.render_widget(card, card_areas[ix]);

            let marker = if is_selected { "(o)" } else { "( )" };
            let body = Paragraph::new(vec![
                Line::from(Span::styled(
                    contract_type.description(),
                    Style::default().fg(Color::Gray),
                )),
                Line::default(),
                Line::from(Span::styled(
                    marker,
                    if is_selected {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    },
                ))
                .alignment(Alignment::Center),
            ])
            .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(body, inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut step = ContractTypeStep::new(ContractType::FixedRate);
        assert_eq!(step.choice(), ContractType::FixedRate);

        step.handle_key(KeyCode::Left);
        assert_eq!(step.choice(), ContractType::FixedRate);

        step.handle_key(KeyCode::Right);
        step.handle_key(KeyCode::Right);
        step.handle_key(KeyCode::Right);
        assert_eq!(step.choice(), ContractType::HourlyBasis);
    }

    #[test]
    fn test_merge_keeps_prior_fields() {
        let prior = ContractDraft {
            job_title: Some("Existing".to_string()),
            ..ContractDraft::default()
        };

        let merged = validate_and_merge(ContractType::Milestone, Some(prior))
            .unwrap()
            .unwrap();
        assert_eq!(merged.contract_type, Some(ContractType::Milestone));
        assert_eq!(merged.job_title.as_deref(), Some("Existing"));
    }

    #[test]
    fn test_merge_with_no_prior_starts_fresh() {
        let merged = validate_and_merge(ContractType::FixedRate, None)
            .unwrap()
            .unwrap();
        assert_eq!(merged.contract_type, Some(ContractType::FixedRate));
        assert!(merged.job_title.is_none());
    }

    #[test]
    fn test_seed_from_draft() {
        let mut step = ContractTypeStep::new(ContractType::FixedRate);
        let draft = ContractDraft {
            contract_type: Some(ContractType::HourlyBasis),
            ..ContractDraft::default()
        };
        step.seed_from(&draft);
        assert_eq!(step.choice(), ContractType::HourlyBasis);
    }
}
