use std::io;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, prelude::Backend};

use crate::error::AppResult;
use crate::ui::model::UiState;

use super::frame::draw_frame;

pub trait UiActions {
    type TerminalBackend: Backend + Send + 'static;

    /// Initialises the terminal for dashboard rendering.
    ///
    /// # Errors
    ///
    /// Returns an error when terminal setup fails.
    fn setup_terminal() -> AppResult<Terminal<Self::TerminalBackend>>;
    fn cleanup();
    fn render(terminal: &mut Terminal<Self::TerminalBackend>, state: &UiState);
}

pub struct Ui;

impl UiActions for Ui {
    type TerminalBackend = CrosstermBackend<io::Stdout>;

    fn setup_terminal() -> AppResult<Terminal<Self::TerminalBackend>> {
        enable_raw_mode()?;
        if let Err(err) = execute!(io::stdout(), EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(io::stdout());
        match Terminal::new(backend) {
            Ok(mut terminal) => {
                if let Err(err) = terminal.clear() {
                    Self::cleanup();
                    return Err(err.into());
                }
                Ok(terminal)
            }
            Err(err) => {
                Self::cleanup();
                Err(err.into())
            }
        }
    }

    fn cleanup() {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
    }

    fn render(terminal: &mut Terminal<Self::TerminalBackend>, state: &UiState) {
        if let Err(err) = terminal.draw(|f| draw_frame(f, state)) {
            eprintln!("Failed to render the dashboard: {}", err);
        }
    }
}
