//! Review step: the assembled draft, read-only.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::contract::ContractDraft;
use crate::stepper::ValidationError;
use crate::ui::wizard::WizardScreen;

/// The review step collects nothing; "Done" commits the draft as-is.
pub fn finalize(
    prior: Option<ContractDraft>,
) -> Result<Option<ContractDraft>, ValidationError> {
    Ok(prior)
}

impl WizardScreen {
    pub(crate) fn render_review_step(&self, frame: &mut Frame, area: Rect) {
        let json = self
            .stepper
            .value()
            .map_or_else(|| "{}".to_string(), ContractDraft::to_pretty_json);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Contract draft ");

        let lines: Vec<Line> = json.lines().map(|l| Line::from(l.to_string())).collect();
        let para = Paragraph::new(lines).block(block);
        frame.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractType;

    #[test]
    fn test_finalize_passes_the_draft_through() {
        let draft = ContractDraft {
            contract_type: Some(ContractType::Milestone),
            ..ContractDraft::default()
        };
        assert_eq!(finalize(Some(draft.clone())).unwrap(), Some(draft));
        assert_eq!(finalize(None).unwrap(), None);
    }
}
