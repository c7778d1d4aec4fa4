// src/tui/terminal.rs
// =============================================================================
// Owns the terminal while the landing page is on screen.
//
// Entering turns on raw mode, the alternate screen, mouse capture (for
// click-outside and clicking rows) and bracketed paste. Dropping the guard
// turns all of it off again, also when the event loop returns an error.
// =============================================================================

use anyhow::{bail, Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal, Stdout};
use tracing::debug;

pub(super) type Term = Terminal<CrosstermBackend<Stdout>>;

pub(super) struct TerminalGuard {
    terminal: Term,
}

impl TerminalGuard {
    pub(super) fn enter() -> Result<Self> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            bail!("the picker needs an interactive terminal (TTY); try `repo-picker list`");
        }

        enable_raw_mode().context("enable raw mode")?;

        let mut stdout = io::stdout();
        if let Err(err) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            let _ = disable_raw_mode();
            return Err(err).context("enter alternate screen");
        }

        let guard = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Self { terminal },
            Err(err) => {
                restore(&mut io::stdout());
                return Err(err).context("create terminal");
            }
        };
        debug!("terminal ready");
        Ok(guard)
    }

    pub(super) fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
        debug!("terminal restored");
    }
}

// Best effort: every step runs even if an earlier one failed
fn restore<W: io::Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(
        writer,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
}
