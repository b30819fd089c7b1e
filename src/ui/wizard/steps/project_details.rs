//! Project details step: job title, description, and the job duration.

use chrono::NaiveDate;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::contract::ContractDraft;
use crate::stepper::{FieldError, ValidationError};
use crate::ui::form_field::FormField;
use crate::ui::wizard::WizardScreen;

const DATE_FORMAT: &str = "%Y-%m-%d";
const FIELD_COUNT: usize = 4;

pub struct ProjectDetailsStep {
    pub job_title: FormField,
    pub description: FormField,
    pub starts_on: FormField,
    pub ends_on: FormField,
    pub focused: usize,
}

impl ProjectDetailsStep {
    pub fn new(default_start: NaiveDate, default_end: NaiveDate) -> Self {
        Self {
            job_title: FormField::text("Enter a title for this job"),
            description: FormField::text_area("Enter a description"),
            starts_on: FormField::date(default_start.format(DATE_FORMAT).to_string()),
            ends_on: FormField::date(default_end.format(DATE_FORMAT).to_string()),
            focused: 0,
        }
    }

    pub fn input(&self) -> ProjectDetailsInput {
        ProjectDetailsInput {
            job_title: self.job_title.value(),
            description: self.description.value(),
            starts_on: self.starts_on.value(),
            ends_on: self.ends_on.value(),
        }
    }

    pub fn seed_from(&mut self, draft: &ContractDraft) {
        if let Some(ref title) = draft.job_title {
            self.job_title.set_value(title);
        }
        if let Some(ref description) = draft.description {
            self.description.set_value(description);
        }
        if let Some(date) = draft.starts_on {
            self.starts_on
                .set_value(&date.format(DATE_FORMAT).to_string());
        }
        if let Some(date) = draft.ends_on {
            self.ends_on.set_value(&date.format(DATE_FORMAT).to_string());
        }
    }

    /// Whether the multi-line description field has focus; Enter then belongs
    /// to the textarea, not to navigation.
    pub fn text_area_focused(&self) -> bool {
        self.focused == 1
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
        let field = match self.focused {
            0 => &mut self.job_title,
            1 => &mut self.description,
            2 => &mut self.starts_on,
            _ => &mut self.ends_on,
        };
        field.handle_key(key)
    }

    /// Duration blurb shown under the date inputs, when both parse.
    pub fn duration_hint(&self) -> Option<String> {
        let from = parse_date(&self.starts_on.value())?;
        let to = parse_date(&self.ends_on.value())?;
        let days = (to - from).num_days();
        if days < 0 {
            return None;
        }
        Some(format!(
            "The job has a selected duration of {} day{}",
            days,
            if days == 1 { "" } else { "s" }
        ))
    }
}

#[derive(Debug, Clone)]
pub struct ProjectDetailsInput {
    pub job_title: String,
    pub description: String,
    pub starts_on: String,
    pub ends_on: String,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Validate the pending form data and merge it into the draft.
pub fn validate_and_merge(
    input: ProjectDetailsInput,
    prior: Option<ContractDraft>,
) -> Result<Option<ContractDraft>, ValidationError> {
    let mut errors = Vec::new();

    if input.job_title.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            "job_title",
            "Job title must be at least 2 characters.",
        ));
    }
    if input.description.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            "description",
            "Description must be at least 2 characters.",
        ));
    }

    let starts_on = parse_date(&input.starts_on);
    if starts_on.is_none() {
        errors.push(FieldError::new(
            "starts_on",
            "Start date must be a valid YYYY-MM-DD date.",
        ));
    }
    let ends_on = parse_date(&input.ends_on);
    if ends_on.is_none() {
        errors.push(FieldError::new(
            "ends_on",
            "End date must be a valid YYYY-MM-DD date.",
        ));
    }
    if let (Some(from), Some(to)) = (starts_on, ends_on) {
        if to < from {
            errors.push(FieldError::new(
                "ends_on",
                "End date must not be before the start date.",
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors.into());
    }

    let mut draft = prior.unwrap_or_default();
    draft.job_title = Some(input.job_title.trim().to_string());
    draft.description = Some(input.description.trim().to_string());
    draft.starts_on = starts_on;
    draft.ends_on = ends_on;
    Ok(Some(draft))
}

impl WizardScreen {
    pub(crate) fn render_project_details_step(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Job title label
                Constraint::Length(1), // Job title input
                Constraint::Length(1), // Description label
                Constraint::Length(5), // Description textarea
                Constraint::Length(1), // Dates label
                Constraint::Length(1), // Date inputs
                Constraint::Length(1), // Duration hint
                Constraint::Min(0),
            ])
            .split(area);

        let step = &mut self.project_details_step;

        frame.render_widget(field_label("Job title", step.focused == 0), chunks[0]);
        step.job_title.render(frame, chunks[1], step.focused == 0);

        frame.render_widget(field_label("Description", step.focused == 1), chunks[2]);
        step.description.render(frame, chunks[3], step.focused == 1);

        frame.render_widget(field_label("Job duration", step.focused >= 2), chunks[4]);
        let date_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14),
                Constraint::Length(4),
                Constraint::Length(14),
                Constraint::Min(0),
            ])
            .split(chunks[5]);
        step.starts_on.render(frame, date_areas[0], step.focused == 2);
        frame.render_widget(
            Paragraph::new(Span::styled(" to ", Style::default().fg(Color::DarkGray))),
            date_areas[1],
        );
        step.ends_on.render(frame, date_areas[2], step.focused == 3);

        if let Some(hint) = step.duration_hint() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    hint,
                    Style::default().fg(Color::DarkGray),
                ))),
                chunks[6],
            );
        }
    }
}

fn field_label(text: &str, focused: bool) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        text,
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProjectDetailsInput {
        ProjectDetailsInput {
            job_title: "Build the billing service".to_string(),
            description: "Design and implement invoicing".to_string(),
            starts_on: "2026-03-01".to_string(),
            ends_on: "2026-04-01".to_string(),
        }
    }

    #[test]
    fn test_valid_input_merges_all_fields() {
        let draft = validate_and_merge(valid_input(), None).unwrap().unwrap();
        assert_eq!(draft.job_title.as_deref(), Some("Build the billing service"));
        assert_eq!(draft.starts_on, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(draft.ends_on, NaiveDate::from_ymd_opt(2026, 4, 1));
        assert_eq!(draft.duration_days(), Some(31));
    }

    #[test]
    fn test_short_title_and_description_are_rejected_together() {
        let mut input = valid_input();
        input.job_title = "x".to_string();
        input.description = " ".to_string();

        let err = validate_and_merge(input, None).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["job_title", "description"]);
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let mut input = valid_input();
        input.ends_on = "next tuesday".to_string();

        let err = validate_and_merge(input, None).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "ends_on");
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut input = valid_input();
        input.ends_on = "2026-02-01".to_string();

        let err = validate_and_merge(input, None).unwrap_err();
        assert!(err.errors.iter().any(|e| e.field == "ends_on"));
    }

    #[test]
    fn test_rejection_does_not_touch_prior_draft() {
        let prior = ContractDraft {
            job_title: Some("Old title".to_string()),
            ..ContractDraft::default()
        };
        let mut input = valid_input();
        input.job_title = String::new();

        assert!(validate_and_merge(input, Some(prior.clone())).is_err());
        // Caller still holds the prior draft untouched; the stepper is what
        // guarantees no commit happened.
        assert_eq!(prior.job_title.as_deref(), Some("Old title"));
    }

    #[test]
    fn test_field_focus_cycles() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut step = ProjectDetailsStep::new(today, today.succ_opt().unwrap());

        assert_eq!(step.focused, 0);
        step.next_field();
        assert!(step.text_area_focused());
        step.next_field();
        step.next_field();
        step.next_field();
        assert_eq!(step.focused, 0);
        step.prev_field();
        assert_eq!(step.focused, 3);
    }

    #[test]
    fn test_duration_hint_tracks_inputs() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut step = ProjectDetailsStep::new(from, to);
        assert_eq!(
            step.duration_hint().as_deref(),
            Some("The job has a selected duration of 1 day")
        );

        step.ends_on.set_value("2026-02-01");
        assert_eq!(step.duration_hint(), None);
    }
}
