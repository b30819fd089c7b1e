//! Reusable form input widgets for the wizard steps

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// A single form input. Each wizard step owns the fields it renders; the
/// stepper engine never sees them.
pub enum FormField {
    /// Single-line text input. `cursor_pos` is a byte offset into `value`,
    /// always kept on a char boundary.
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// Selection from a fixed list of options
    Select {
        options: Vec<String>,
        selected: usize,
        list_state: ListState,
    },
    /// Date input (YYYY-MM-DD)
    DateInput { value: String, cursor_pos: usize },
}

impl FormField {
    pub fn text(placeholder: impl Into<String>) -> Self {
        FormField::TextInput {
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.into(),
        }
    }

    pub fn text_area(placeholder: impl Into<String>) -> Self {
        FormField::TextArea {
            textarea: Box::new(TextArea::default()),
            placeholder: placeholder.into(),
        }
    }

    pub fn select(options: Vec<String>, selected: usize) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        FormField::Select {
            options,
            selected,
            list_state,
        }
    }

    pub fn date(value: impl Into<String>) -> Self {
        let value = value.into();
        FormField::DateInput {
            cursor_pos: value.len(),
            value,
        }
    }

    /// Current value as a string
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::Select {
                options, selected, ..
            } => options.get(*selected).cloned().unwrap_or_default(),
            FormField::DateInput { value, .. } => value.clone(),
        }
    }

    /// Set the value from a string (used to re-seed forms from the draft)
    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.len();
            }
            FormField::TextArea { textarea, .. } => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(new_value);
            }
            FormField::Select {
                options,
                selected,
                list_state,
            } => {
                if let Some(idx) = options.iter().position(|o| o == new_value) {
                    *selected = idx;
                    list_state.select(Some(idx));
                }
            }
            FormField::DateInput {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.len();
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FormField::TextArea { textarea, .. } => {
                textarea.lines().iter().all(|l| l.trim().is_empty())
            }
            _ => self.value().trim().is_empty(),
        }
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => match key {
                KeyCode::Char(c) => {
                    value.insert(*cursor_pos, c);
                    *cursor_pos += c.len_utf8();
                    true
                }
                KeyCode::Backspace => {
                    if let Some(start) = prev_char_start(value, *cursor_pos) {
                        value.remove(start);
                        *cursor_pos = start;
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.len() {
                        value.remove(*cursor_pos);
                    }
                    true
                }
                KeyCode::Left => {
                    if let Some(start) = prev_char_start(value, *cursor_pos) {
                        *cursor_pos = start;
                    }
                    true
                }
                KeyCode::Right => {
                    *cursor_pos = next_char_end(value, *cursor_pos);
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.len();
                    true
                }
                _ => false,
            },
            FormField::TextArea { textarea, .. } => {
                // TextArea handles its own key events, including Enter
                textarea.input(crossterm::event::KeyEvent::new(
                    key,
                    crossterm::event::KeyModifiers::NONE,
                ));
                true
            }
            FormField::Select {
                options,
                selected,
                list_state,
            } => match key {
                KeyCode::Up | KeyCode::Char('k') => {
                    if *selected > 0 {
                        *selected -= 1;
                        list_state.select(Some(*selected));
                    }
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if *selected < options.len().saturating_sub(1) {
                        *selected += 1;
                        list_state.select(Some(*selected));
                    }
                    true
                }
                _ => false,
            },
            FormField::DateInput {
                value, cursor_pos, ..
            } => match key {
                KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                    // YYYY-MM-DD is 10 characters
                    if value.len() < 10 {
                        value.insert(*cursor_pos, c);
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Backspace => {
                    if let Some(start) = prev_char_start(value, *cursor_pos) {
                        value.remove(start);
                        *cursor_pos = start;
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.len() {
                        value.remove(*cursor_pos);
                    }
                    true
                }
                KeyCode::Left => {
                    if let Some(start) = prev_char_start(value, *cursor_pos) {
                        *cursor_pos = start;
                    }
                    true
                }
                KeyCode::Right => {
                    *cursor_pos = next_char_end(value, *cursor_pos);
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.len();
                    true
                }
                _ => false,
            },
        }
    }

    /// Height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextInput { .. } | FormField::DateInput { .. } => 1,
            FormField::TextArea { .. } => 5,
            FormField::Select { options, .. } => (options.len() as u16).min(5),
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::Gray };

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                ..
            } => {
                render_line_input(frame, area, value, *cursor_pos, placeholder, focused);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );

                if textarea.lines().iter().all(|l| l.is_empty()) && !focused {
                    textarea.set_placeholder_text(placeholder.clone());
                    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
                }

                frame.render_widget(&**textarea, area);
            }
            FormField::Select {
                options,
                selected,
                list_state,
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .enumerate()
                    .map(|(i, opt)| {
                        let style = if i == *selected {
                            Style::default().add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        ListItem::new(Span::styled(opt.clone(), style))
                    })
                    .collect();

                let list = List::new(items)
                    .highlight_style(
                        Style::default()
                            .add_modifier(Modifier::REVERSED)
                            .fg(Color::Cyan),
                    )
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list, area, list_state);
            }
            FormField::DateInput { value, cursor_pos } => {
                render_line_input(frame, area, value, *cursor_pos, "YYYY-MM-DD", focused);
            }
        }
    }
}

/// Start of the char just before `cursor`, or `None` at the start of line.
fn prev_char_start(value: &str, cursor: usize) -> Option<usize> {
    value[..cursor].char_indices().last().map(|(ix, _)| ix)
}

/// End of the char at `cursor`; `cursor` itself at the end of line.
fn next_char_end(value: &str, cursor: usize) -> usize {
    value[cursor..]
        .chars()
        .next()
        .map_or(cursor, |c| cursor + c.len_utf8())
}

fn render_line_input(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    cursor_pos: usize,
    placeholder: &str,
    focused: bool,
) {
    let display = if value.is_empty() && !focused {
        Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut text = value.to_string();
        if focused {
            if cursor_pos < text.len() {
                text.insert(cursor_pos, '|');
            } else {
                text.push('|');
            }
        }
        Line::from(text)
    };

    let para = Paragraph::new(display).style(Style::default().fg(if focused {
        Color::White
    } else {
        Color::Gray
    }));
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_handles_chars() {
        let mut field = FormField::text("placeholder");
        assert!(field.handle_key(KeyCode::Char('h')));
        assert!(field.handle_key(KeyCode::Char('i')));
        assert_eq!(field.value(), "hi");
    }

    #[test]
    fn test_text_input_backspace_and_cursor() {
        let mut field = FormField::text("");
        field.set_value("abc");
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "ab");

        field.handle_key(KeyCode::Left);
        field.handle_key(KeyCode::Char('x'));
        assert_eq!(field.value(), "axb");
    }

    #[test]
    fn test_text_input_edits_multibyte_text_at_char_boundaries() {
        let mut field = FormField::text("");
        for c in "café".chars() {
            field.handle_key(KeyCode::Char(c));
        }
        field.handle_key(KeyCode::Char('é'));
        assert_eq!(field.value(), "caféé");

        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "café");

        // Left steps over the whole 'é', not into it
        field.handle_key(KeyCode::Left);
        field.handle_key(KeyCode::Char('s'));
        assert_eq!(field.value(), "cafsé");

        field.handle_key(KeyCode::Right);
        field.handle_key(KeyCode::Char('!'));
        assert_eq!(field.value(), "cafsé!");

        field.handle_key(KeyCode::Home);
        field.handle_key(KeyCode::Delete);
        assert_eq!(field.value(), "afsé!");
    }

    #[test]
    fn test_date_input_supports_full_line_editing() {
        let mut field = FormField::date("2026-03-01");

        field.handle_key(KeyCode::Home);
        field.handle_key(KeyCode::Delete);
        assert_eq!(field.value(), "026-03-01");

        field.handle_key(KeyCode::Char('2'));
        assert_eq!(field.value(), "2026-03-01");

        field.handle_key(KeyCode::End);
        field.handle_key(KeyCode::Backspace);
        assert_eq!(field.value(), "2026-03-0");
    }

    #[test]
    fn test_select_navigation_wraps_at_bounds() {
        let mut field = FormField::select(
            vec!["USD".to_string(), "EUR".to_string(), "GBP".to_string()],
            0,
        );
        assert_eq!(field.value(), "USD");

        field.handle_key(KeyCode::Up);
        assert_eq!(field.value(), "USD");

        field.handle_key(KeyCode::Down);
        field.handle_key(KeyCode::Down);
        field.handle_key(KeyCode::Down);
        assert_eq!(field.value(), "GBP");
    }

    #[test]
    fn test_select_set_value_picks_matching_option() {
        let mut field = FormField::select(vec!["USD".to_string(), "EUR".to_string()], 0);
        field.set_value("EUR");
        assert_eq!(field.value(), "EUR");

        // Unknown option leaves the selection alone
        field.set_value("JPY");
        assert_eq!(field.value(), "EUR");
    }

    #[test]
    fn test_date_input_accepts_only_date_characters() {
        let mut field = FormField::date("");
        for c in "2026-03-01".chars() {
            field.handle_key(KeyCode::Char(c));
        }
        assert_eq!(field.value(), "2026-03-01");

        // Letters are ignored, and the length is capped at 10
        field.handle_key(KeyCode::Char('x'));
        field.handle_key(KeyCode::Char('1'));
        assert_eq!(field.value(), "2026-03-01");
    }

    #[test]
    fn test_text_area_joins_lines() {
        let mut field = FormField::text_area("");
        field.handle_key(KeyCode::Char('a'));
        field.handle_key(KeyCode::Enter);
        field.handle_key(KeyCode::Char('b'));
        assert_eq!(field.value(), "a\nb");
        assert!(!field.is_empty());
    }

    #[test]
    fn test_is_empty_ignores_whitespace() {
        let mut field = FormField::text("");
        assert!(field.is_empty());
        field.set_value("   ");
        assert!(field.is_empty());
        field.set_value(" x ");
        assert!(!field.is_empty());
    }
}
