// src/tui/mod.rs
// =============================================================================
// The interactive landing page.
//
// Submodules:
// - terminal: raw mode / alternate screen, restored on drop
// - app: state between frames and event handling
// - render: drawing with ratatui, plus hit areas for the mouse
//
// The loop is a plain blocking loop (draw, poll input for 50ms, repeat).
// The GitHub fetch runs as a tokio task on the runtime's worker threads and
// reports back through the data source's channel.
// =============================================================================

mod app;
mod render;
mod terminal;

use anyhow::{Context, Result};
use crossterm::event;
use std::time::Duration;
use tracing::{info, warn};

pub use app::Profile;

use app::App;
use render::HitAreas;
use terminal::{Term, TerminalGuard};

use crate::source::RepoSource;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the landing page until the user quits.
///
/// Must be called from inside a multi-threaded tokio runtime, since the
/// fetch tasks need worker threads while this loop blocks.
pub fn run(profile: Profile, source: RepoSource, initial_path: Option<&str>) -> Result<()> {
    let mut app = App::new(profile, source);
    if let Some(path) = initial_path {
        if !app.picker.set_text(path) {
            warn!(path, base = app.picker.base(), "initial path ignored: outside the base path");
        }
    }

    let mut guard = TerminalGuard::enter()?;
    app.start();
    info!(user = %app.source.config().username, "picker started");

    let result = run_loop(guard.terminal_mut(), &mut app);
    drop(guard);
    result
}

fn run_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        app.sync_source();

        let mut hits = HitAreas::default();
        terminal
            .draw(|frame| hits = render::draw(frame, app))
            .context("draw")?;
        app.hits = hits;

        if app.quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL).context("poll")? {
            app.handle_event(event::read().context("read event")?);
        }
    }
}
