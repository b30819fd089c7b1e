use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::contract::ContractDraft;
use crate::ui::{install_panic_hook, TerminalGuard, WizardEvent, WizardScreen};

/// Owns the terminal and the wizard, and runs the event loop.
///
/// Step transitions are awaited inline here, so a second "Next" cannot be
/// processed while one is in flight.
pub struct App {
    config: Config,
    wizard: WizardScreen,
    should_quit: bool,
    outcome: Option<ContractDraft>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let wizard = WizardScreen::new(&config);
        Self {
            config,
            wizard,
            should_quit: false,
            outcome: None,
        }
    }

    /// Run the wizard to completion. Returns the drafted contract, or `None`
    /// when the user cancelled.
    pub async fn run(&mut self) -> Result<Option<ContractDraft>> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            terminal.draw(|f| self.wizard.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }
        }

        Ok(self.outcome.take())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits, discarding the draft
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            tracing::info!("interrupted");
            self.should_quit = true;
            return;
        }

        match self.wizard.handle_key(key).await {
            WizardEvent::Continue => {}
            WizardEvent::Completed(draft) => {
                self.outcome = Some(draft);
                self.should_quit = true;
            }
            WizardEvent::Cancelled => {
                self.should_quit = true;
            }
        }
    }
}
