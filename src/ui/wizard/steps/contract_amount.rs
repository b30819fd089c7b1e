//! Contract amount step: how much, in what currency.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::contract::{ContractDraft, ContractType, Currency};
use crate::stepper::{FieldError, ValidationError};
use crate::ui::form_field::FormField;
use crate::ui::wizard::WizardScreen;

const FIELD_COUNT: usize = 2;

pub struct ContractAmountStep {
    pub amount: FormField,
    pub currency: FormField,
    pub focused: usize,
}

impl ContractAmountStep {
    pub fn new(default_currency: Currency) -> Self {
        let codes: Vec<String> = Currency::all().iter().map(|c| c.code().to_string()).collect();
        let selected = Currency::all()
            .iter()
            .position(|c| c == &default_currency)
            .unwrap_or(0);
        Self {
            amount: FormField::text("0.00"),
            currency: FormField::select(codes, selected),
            focused: 0,
        }
    }

    pub fn input(&self) -> ContractAmountInput {
        ContractAmountInput {
            amount: self.amount.value(),
            currency: self.currency.value(),
        }
    }

    pub fn seed_from(&mut self, draft: &ContractDraft) {
        if let Some(amount) = draft.amount {
            self.amount.set_value(&amount.to_string());
        }
        if let Some(currency) = draft.currency {
            self.currency.set_value(currency.code());
        }
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.focused = if self.focused == 0 {
            FIELD_COUNT - 1
        } else {
            self.focused - 1
        };
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.focused {
            0 => match key {
                // Amount takes digits and the decimal point; parse catches the rest
                KeyCode::Char(c) if !c.is_ascii_digit() && c != '.' => false,
                _ => self.amount.handle_key(key),
            },
            _ => self.currency.handle_key(key),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractAmountInput {
    pub amount: String,
    pub currency: String,
}

/// Validate the amount and merge amount + currency into the draft.
pub fn validate_and_merge(
    input: ContractAmountInput,
    prior: Option<ContractDraft>,
) -> Result<Option<ContractDraft>, ValidationError> {
    let mut errors = Vec::new();

    let amount = input.amount.trim().parse::<f64>().ok();
    match amount {
        None => errors.push(FieldError::new("amount", "Amount must be a number.")),
        Some(a) if a <= 0.0 => {
            errors.push(FieldError::new("amount", "Amount must be greater than zero."));
        }
        Some(_) => {}
    }

    let currency = Currency::from_code(input.currency.trim());
    if currency.is_none() {
        errors.push(FieldError::new("currency", "Unknown currency."));
    }

    if !errors.is_empty() {
        return Err(errors.into());
    }

    let mut draft = prior.unwrap_or_default();
    draft.amount = amount;
    draft.currency = currency;
    Ok(Some(draft))
}

impl WizardScreen {
    pub(crate) fn render_contract_amount_step(&mut self, frame: &mut Frame, area: Rect) {
        // Label follows the contract type chosen on the first step
        let amount_label = self
            .stepper
            .value()
            .and_then(|draft| draft.contract_type)
            .unwrap_or(ContractType::FixedRate)
            .amount_label();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Amount label
                Constraint::Length(1), // Amount input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Currency label
                Constraint::Length(3), // Currency select
                Constraint::Min(0),
            ])
            .split(area);

        let step = &mut self.contract_amount_step;

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                amount_label,
                if step.focused == 0 {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ))),
            chunks[0],
        );
        step.amount.render(frame, chunks[1], step.focused == 0);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Currency",
                if step.focused == 1 {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ))),
            chunks[3],
        );
        step.currency.render(frame, chunks[4], step.focused == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: &str, currency: &str) -> ContractAmountInput {
        ContractAmountInput {
            amount: amount.to_string(),
            currency: currency.to_string(),
        }
    }

    #[test]
    fn test_valid_amount_merges() {
        let draft = validate_and_merge(input("1500.50", "EUR"), None)
            .unwrap()
            .unwrap();
        assert_eq!(draft.amount, Some(1500.50));
        assert_eq!(draft.currency, Some(Currency::Eur));
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let err = validate_and_merge(input("a lot", "USD"), None).unwrap_err();
        assert_eq!(err.errors[0].field, "amount");
    }

    #[test]
    fn test_zero_and_negative_amounts_are_rejected() {
        assert!(validate_and_merge(input("0", "USD"), None).is_err());
        assert!(validate_and_merge(input("-10", "USD"), None).is_err());
    }

    #[test]
    fn test_amount_field_filters_non_numeric_keys() {
        let mut step = ContractAmountStep::new(Currency::Usd);
        step.handle_key(KeyCode::Char('1'));
        step.handle_key(KeyCode::Char('x'));
        step.handle_key(KeyCode::Char('.'));
        step.handle_key(KeyCode::Char('5'));
        assert_eq!(step.amount.value(), "1.5");
    }

    #[test]
    fn test_seed_from_draft_restores_both_fields() {
        let mut step = ContractAmountStep::new(Currency::Usd);
        let draft = ContractDraft {
            amount: Some(250.0),
            currency: Some(Currency::Gbp),
            ..ContractDraft::default()
        };
        step.seed_from(&draft);
        assert_eq!(step.amount.value(), "250");
        assert_eq!(step.currency.value(), "GBP");
    }
}
