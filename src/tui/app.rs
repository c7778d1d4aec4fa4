// src/tui/app.rs
// =============================================================================
// App: everything the landing page needs between two frames.
//
// Terminal events come in through handle_event() and are either handled here
// (global shortcuts, mouse hit-testing, quitting) or translated into
// PickerKey values for the picker.
// =============================================================================

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use tracing::{debug, warn};

use super::render::{Hit, HitAreas};
use crate::browser;
use crate::picker::{KeyOutcome, PathPicker, PickerKey};
use crate::source::RepoSource;

/// Text at the top of the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
}

pub(super) struct App {
    pub(super) profile: Profile,
    pub(super) source: RepoSource,
    pub(super) picker: PathPicker,
    // Where the field and dropdown were drawn last frame
    pub(super) hits: HitAreas,
    // One-line message shown in place of the key hints
    pub(super) status: Option<String>,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn new(profile: Profile, source: RepoSource) -> Self {
        let picker = PathPicker::new(&source.config().username, source.names());
        Self {
            profile,
            source,
            picker,
            hits: HitAreas::default(),
            status: None,
            quit: false,
        }
    }

    /// Kicks off the first fetch.
    pub(super) fn start(&mut self) {
        self.source.refetch();
    }

    /// Picks up finished fetches and hands the names to the picker.
    pub(super) fn sync_source(&mut self) {
        if self.source.poll() {
            self.picker.set_candidates(self.source.names());
        }
    }

    /// The field only exists once repositories loaded without error
    pub(super) fn is_ready(&self) -> bool {
        !self.source.is_loading() && self.source.error().is_none()
    }

    pub(super) fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => {
                if self.is_ready() && self.picker.is_focused() && !self.picker.paste(&text) {
                    debug!("paste rejected");
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.quit = true;
                return;
            }
            KeyCode::Char('r') if ctrl => {
                self.status = None;
                self.source.refetch();
                return;
            }
            // Most terminals send ctrl+/ as ctrl+7 (0x1f)
            KeyCode::Char('/') | KeyCode::Char('7') if ctrl => {
                if self.is_ready() {
                    debug!("repo picker shortcut");
                    self.status = None;
                    self.picker.open_all();
                }
                return;
            }
            KeyCode::Char('o') if ctrl => {
                self.open_current();
                return;
            }
            _ => {}
        }

        if !self.is_ready() || !self.picker.is_focused() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
                KeyCode::Tab if self.is_ready() => self.picker.focus(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.picker.blur();
                return;
            }
            KeyCode::Esc if !self.picker.is_open() => {
                self.picker.blur();
                return;
            }
            _ => {}
        }

        let Some(picker_key) = to_picker_key(key) else {
            return;
        };
        match self.picker.handle_key(picker_key) {
            KeyOutcome::Selected(text) => {
                self.status = Some(format!("ctrl+o opens {}", text));
            }
            KeyOutcome::Rejected => debug!(?picker_key, "edit rejected"),
            KeyOutcome::Handled | KeyOutcome::Ignored => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        match self.hits.hit(Position::new(mouse.column, mouse.row)) {
            Hit::Row(index) => {
                if let Some(text) = self.picker.select(index) {
                    self.picker.focus();
                    self.status = Some(format!("ctrl+o opens {}", text));
                }
            }
            Hit::Field => self.picker.focus(),
            Hit::Dropdown => {}
            Hit::Outside => self.picker.click_outside(),
        }
    }

    fn open_current(&mut self) {
        let opened = self
            .picker
            .browser_url()
            .map_err(anyhow::Error::from)
            .and_then(|url| browser::open_in_browser(&url).map(|()| url));

        self.status = Some(match opened {
            Ok(url) => format!("opened {}", url),
            Err(err) => {
                warn!(error = %format!("{:#}", err), "could not open browser");
                format!("could not open: {:#}", err)
            }
        });
    }
}

// Translates a key press into a picker key; None for keys the field ignores
fn to_picker_key(key: KeyEvent) -> Option<PickerKey> {
    let picker_key = match key.code {
        KeyCode::Up => PickerKey::Up,
        KeyCode::Down => PickerKey::Down,
        KeyCode::Enter => PickerKey::Enter,
        KeyCode::Esc => PickerKey::Escape,
        KeyCode::Backspace => PickerKey::Backspace,
        KeyCode::Delete => PickerKey::Delete,
        KeyCode::Left => PickerKey::Left,
        KeyCode::Right => PickerKey::Right,
        KeyCode::Home => PickerKey::Home,
        KeyCode::End => PickerKey::End,
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            PickerKey::Char(c)
        }
        _ => return None,
    };
    Some(picker_key)
}
