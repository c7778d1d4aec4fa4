// src/picker/state.rs
// =============================================================================
// PathPicker: the `github.com/<user>/<repo>` field and its dropdown.
//
// States:
// - Closed: only the field is shown
// - OpenWithCandidates: dropdown lists matching repository names
// - OpenEmpty: dropdown is open but there is nothing to list
//
// Rules:
// - The text always starts with the base path `github.com/<user>`
// - Typing `/` after the base path shows every candidate
// - Typing more filters candidates by case-insensitive prefix
// - The dropdown closes by itself once the segment is the only candidate
// - Arrow keys move a highlight, Enter picks it, Escape closes
//
// Rust concepts:
// - Option<usize>: "no highlight" without a magic -1
// - Enums with data: KeyOutcome::Selected carries the new text
// - Slice patterns: see filter.rs
// =============================================================================

use tracing::debug;
use url::Url;

use super::filter::{filter_candidates, is_exact_unique_match};
use super::input::PathInput;
use crate::browser;

/// Host part of the base path
pub const HOST: &str = "github.com";

/// Keys the picker understands, already translated from terminal events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Char(char),
}

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State changed (or the caret moved)
    Handled,
    /// The edit would have broken the base path, nothing changed
    Rejected,
    /// The key means nothing in the current state
    Ignored,
    /// A candidate was picked; carries the new text
    Selected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerView {
    Closed,
    OpenWithCandidates,
    OpenEmpty,
}

#[derive(Debug, Clone)]
pub struct PathPicker {
    input: PathInput,
    // Every repository name, in the order the data source published them
    names: Vec<String>,
    // The filtered view of `names` for the current segment
    candidates: Vec<String>,
    open: bool,
    highlight: Option<usize>,
    focused: bool,
}

impl PathPicker {
    pub fn new(username: &str, names: Vec<String>) -> Self {
        let mut picker = Self {
            input: PathInput::new(format!("{HOST}/{username}")),
            names,
            candidates: Vec::new(),
            open: false,
            highlight: None,
            focused: false,
        };
        picker.recompute();
        picker
    }

    /// `github.com/<user>`, without the trailing slash
    pub fn base(&self) -> &str {
        self.input.base()
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    /// Caret position, in chars
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn view(&self) -> PickerView {
        match (self.open, self.candidates.is_empty()) {
            (false, _) => PickerView::Closed,
            (true, false) => PickerView::OpenWithCandidates,
            (true, true) => PickerView::OpenEmpty,
        }
    }

    /// True when the text points exactly at `name`
    pub fn is_current(&self, name: &str) -> bool {
        self.text()
            .strip_prefix(self.base())
            .and_then(|rest| rest.strip_prefix('/'))
            == Some(name)
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replaces the repository list, e.g. when a fetch finishes.
    pub fn set_candidates(&mut self, names: Vec<String>) {
        self.names = names;
        self.recompute();
        if self.highlight.is_some_and(|i| i >= self.candidates.len()) {
            self.highlight = None;
        }
    }

    /// Controlled edit of the whole text.
    ///
    /// Returns `false` and leaves everything untouched if `text` does not
    /// start with the base path.
    pub fn set_text(&mut self, text: &str) -> bool {
        if !self.input.set(text.to_string()) {
            return false;
        }
        self.after_edit();
        true
    }

    /// Inserts pasted text at the caret, under the same rule as typing.
    pub fn paste(&mut self, text: &str) -> bool {
        // A newline would submit in a browser field; here it is just dropped
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if !self.input.insert_str(&text) {
            return false;
        }
        self.after_edit();
        true
    }

    pub fn handle_key(&mut self, key: PickerKey) -> KeyOutcome {
        if key == PickerKey::Backspace && self.input.is_at_base() {
            return KeyOutcome::Rejected;
        }

        // First arrow press on a closed list only opens it
        if matches!(key, PickerKey::Up | PickerKey::Down)
            && !self.open
            && !self.candidates.is_empty()
        {
            self.open = true;
            return KeyOutcome::Handled;
        }

        if self.open {
            match key {
                PickerKey::Down => {
                    self.highlight_next();
                    return KeyOutcome::Handled;
                }
                PickerKey::Up => {
                    self.highlight_prev();
                    return KeyOutcome::Handled;
                }
                PickerKey::Enter => {
                    if let Some(index) = self.highlight {
                        return match self.select(index) {
                            Some(text) => KeyOutcome::Selected(text),
                            None => KeyOutcome::Ignored,
                        };
                    }
                }
                PickerKey::Escape => {
                    self.close();
                    return KeyOutcome::Handled;
                }
                _ => {}
            }
        }

        let accepted = match key {
            PickerKey::Char(c) => {
                let mut buf = [0u8; 4];
                self.input.insert_str(c.encode_utf8(&mut buf))
            }
            PickerKey::Backspace => self.input.backspace(),
            PickerKey::Delete => self.input.delete(),
            PickerKey::Left => {
                self.input.move_left();
                return KeyOutcome::Handled;
            }
            PickerKey::Right => {
                self.input.move_right();
                return KeyOutcome::Handled;
            }
            PickerKey::Home => {
                self.input.move_home();
                return KeyOutcome::Handled;
            }
            PickerKey::End => {
                self.input.move_end();
                return KeyOutcome::Handled;
            }
            PickerKey::Up | PickerKey::Down | PickerKey::Enter | PickerKey::Escape => {
                return KeyOutcome::Ignored;
            }
        };

        if accepted {
            self.after_edit();
            KeyOutcome::Handled
        } else {
            KeyOutcome::Rejected
        }
    }

    /// Picks `candidates[index]`: the text becomes `base/<name>` and the
    /// dropdown closes.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let name = self.candidates.get(index)?.clone();
        let text = format!("{}/{}", self.base(), name);
        if !self.input.set(text.clone()) {
            return None;
        }
        self.recompute();
        self.close();
        debug!(repo = %name, "picked repository");
        Some(text)
    }

    /// The global shortcut: focus, reset to `base/` and list everything.
    pub fn open_all(&mut self) {
        let text = format!("{}/", self.base());
        self.input.set(text);
        self.focused = true;
        self.candidates = self.names.clone();
        self.open = true;
        self.highlight = None;
    }

    /// A click that hit neither the field nor the dropdown.
    pub fn click_outside(&mut self) {
        self.open = false;
        self.focused = false;
    }

    /// The current text as something a browser can open.
    pub fn browser_url(&self) -> Result<Url, url::ParseError> {
        browser::to_browser_url(self.text())
    }

    fn close(&mut self) {
        self.open = false;
        self.highlight = None;
    }

    fn after_edit(&mut self) {
        self.highlight = None;
        self.recompute();
    }

    // Text after `base/`, or None if the slash hasn't been typed yet
    fn segment(&self) -> Option<&str> {
        self.text()
            .strip_prefix(self.base())
            .and_then(|rest| rest.strip_prefix('/'))
    }

    fn recompute(&mut self) {
        let (candidates, open) = match self.segment() {
            None => (Vec::new(), false),
            Some("") => (self.names.clone(), true),
            Some(segment) => {
                let filtered = filter_candidates(&self.names, segment);
                let exact = is_exact_unique_match(&filtered, segment);
                let open = !filtered.is_empty() && !exact;
                (filtered, open)
            }
        };
        self.candidates = candidates;
        self.open = open;
    }

    // Down: none -> 0 -> ... -> last, then stays on last
    fn highlight_next(&mut self) {
        let Some(last) = self.candidates.len().checked_sub(1) else {
            return;
        };
        self.highlight = Some(match self.highlight {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    // Up: k -> k-1, 0 -> none
    fn highlight_prev(&mut self) {
        self.highlight = match self.highlight {
            Some(i) if i > 0 => Some(i - 1),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "github.com/octo";

    fn picker(names: &[&str]) -> PathPicker {
        PathPicker::new("octo", names.iter().map(|s| s.to_string()).collect())
    }

    fn type_str(picker: &mut PathPicker, s: &str) {
        for c in s.chars() {
            picker.handle_key(PickerKey::Char(c));
        }
    }

    #[test]
    fn test_initial_state() {
        let p = picker(&["Alpha"]);
        assert_eq!(p.base(), BASE);
        assert_eq!(p.text(), BASE);
        assert_eq!(p.view(), PickerView::Closed);
        assert_eq!(p.highlight(), None);
        assert!(p.candidates().is_empty());
    }

    #[test]
    fn test_slash_shows_every_candidate() {
        let mut p = picker(&["Alpha", "Beta", "Alphabet"]);
        type_str(&mut p, "/");
        assert_eq!(p.view(), PickerView::OpenWithCandidates);
        assert_eq!(p.candidates(), &["Alpha", "Beta", "Alphabet"]);
    }

    #[test]
    fn test_prefix_filter_opens_dropdown() {
        let mut p = picker(&["Alpha", "Beta", "Alphabet"]);
        type_str(&mut p, "/Alp");
        assert_eq!(p.candidates(), &["Alpha", "Alphabet"]);
        assert!(p.is_open());
    }

    #[test]
    fn test_exact_unique_match_auto_closes() {
        let mut p = picker(&["Alpha", "Beta", "Alphabet"]);
        type_str(&mut p, "/beta");
        assert_eq!(p.candidates(), &["Beta"]);
        assert_eq!(p.view(), PickerView::Closed);
    }

    #[test]
    fn test_case_only_duplicates_stay_open() {
        let mut p = picker(&["Demo", "demo"]);
        type_str(&mut p, "/demo");
        assert_eq!(p.candidates().len(), 2);
        assert!(p.is_open());
    }

    #[test]
    fn test_no_match_closes() {
        let mut p = picker(&["Alpha", "Beta"]);
        type_str(&mut p, "/zzz");
        assert!(p.candidates().is_empty());
        assert_eq!(p.view(), PickerView::Closed);
    }

    #[test]
    fn test_empty_list_with_slash_is_open_empty() {
        let mut p = picker(&[]);
        type_str(&mut p, "/");
        assert_eq!(p.view(), PickerView::OpenEmpty);
    }

    #[test]
    fn test_no_slash_no_dropdown() {
        let mut p = picker(&["Alpha"]);
        type_str(&mut p, "x");
        assert_eq!(p.text(), "github.com/octox");
        assert_eq!(p.view(), PickerView::Closed);
        assert!(p.candidates().is_empty());
    }

    #[test]
    fn test_backspace_at_base_is_noop() {
        let mut p = picker(&["Alpha"]);
        assert_eq!(p.handle_key(PickerKey::Backspace), KeyOutcome::Rejected);
        assert_eq!(p.text(), BASE);
    }

    #[test]
    fn test_text_always_keeps_base() {
        let mut p = picker(&["Alpha", "Beta"]);
        let keys = [
            PickerKey::Char('/'),
            PickerKey::Char('a'),
            PickerKey::Backspace,
            PickerKey::Backspace,
            PickerKey::Backspace,
            PickerKey::Backspace,
            PickerKey::Left,
            PickerKey::Left,
            PickerKey::Delete,
            PickerKey::Backspace,
            PickerKey::Char('q'),
            PickerKey::Home,
            PickerKey::Backspace,
            PickerKey::End,
            PickerKey::Char('/'),
            PickerKey::Down,
            PickerKey::Enter,
            PickerKey::Escape,
        ];
        for key in keys {
            p.handle_key(key);
            assert!(p.text().starts_with(BASE), "{:?} broke {}", key, p.text());
        }
        assert!(!p.set_text("github.com/someone-else"));
        assert!(!p.set_text(""));
        assert!(p.text().starts_with(BASE));
    }

    #[test]
    fn test_arrow_navigation_clamps() {
        let mut p = picker(&["Alpha", "Beta", "Gamma"]);
        type_str(&mut p, "/");

        p.handle_key(PickerKey::Down);
        assert_eq!(p.highlight(), Some(0));
        p.handle_key(PickerKey::Down);
        p.handle_key(PickerKey::Down);
        p.handle_key(PickerKey::Down);
        p.handle_key(PickerKey::Down);
        assert_eq!(p.highlight(), Some(2));

        p.handle_key(PickerKey::Up);
        p.handle_key(PickerKey::Up);
        assert_eq!(p.highlight(), Some(0));
        p.handle_key(PickerKey::Up);
        assert_eq!(p.highlight(), None);
        p.handle_key(PickerKey::Up);
        assert_eq!(p.highlight(), None);
    }

    #[test]
    fn test_first_arrow_on_closed_list_only_opens() {
        let mut p = picker(&["Alpha", "Beta"]);
        type_str(&mut p, "/");
        p.handle_key(PickerKey::Escape);
        assert!(!p.is_open());

        assert_eq!(p.handle_key(PickerKey::Down), KeyOutcome::Handled);
        assert!(p.is_open());
        assert_eq!(p.highlight(), None);
    }

    #[test]
    fn test_arrow_without_candidates_is_ignored() {
        let mut p = picker(&["Alpha"]);
        assert_eq!(p.handle_key(PickerKey::Down), KeyOutcome::Ignored);
        assert!(!p.is_open());
    }

    #[test]
    fn test_enter_selects_highlighted() {
        let mut p = picker(&["Alpha", "Beta", "Alphabet"]);
        type_str(&mut p, "/al");
        p.handle_key(PickerKey::Down);
        p.handle_key(PickerKey::Down);

        let outcome = p.handle_key(PickerKey::Enter);
        assert_eq!(
            outcome,
            KeyOutcome::Selected("github.com/octo/Alphabet".to_string())
        );
        assert_eq!(p.text(), "github.com/octo/Alphabet");
        assert!(!p.is_open());
        assert_eq!(p.highlight(), None);
        assert!(p.is_current("Alphabet"));
        assert!(!p.is_current("Alpha"));
    }

    #[test]
    fn test_enter_without_highlight_does_nothing() {
        let mut p = picker(&["Alpha", "Beta"]);
        type_str(&mut p, "/");
        assert_eq!(p.handle_key(PickerKey::Enter), KeyOutcome::Ignored);
        assert_eq!(p.text(), "github.com/octo/");
        assert!(p.is_open());
    }

    #[test]
    fn test_escape_closes_and_keeps_text() {
        let mut p = picker(&["Alpha", "Beta"]);
        type_str(&mut p, "/a");
        p.handle_key(PickerKey::Down);
        p.handle_key(PickerKey::Escape);
        assert!(!p.is_open());
        assert_eq!(p.highlight(), None);
        assert_eq!(p.text(), "github.com/octo/a");
    }

    #[test]
    fn test_typing_resets_highlight() {
        let mut p = picker(&["Alpha", "Alphabet"]);
        type_str(&mut p, "/");
        p.handle_key(PickerKey::Down);
        p.handle_key(PickerKey::Char('a'));
        assert_eq!(p.highlight(), None);
    }

    #[test]
    fn test_click_select() {
        let mut p = picker(&["Alpha", "Beta"]);
        type_str(&mut p, "/");
        assert_eq!(p.select(1), Some("github.com/octo/Beta".to_string()));
        assert_eq!(p.view(), PickerView::Closed);
        assert_eq!(p.select(7), None);
    }

    #[test]
    fn test_open_all_shortcut() {
        let mut p = picker(&["Alpha", "Beta"]);
        type_str(&mut p, "/zz");
        p.open_all();
        assert!(p.is_focused());
        assert_eq!(p.text(), "github.com/octo/");
        assert_eq!(p.candidates(), &["Alpha", "Beta"]);
        assert_eq!(p.view(), PickerView::OpenWithCandidates);
        assert_eq!(p.cursor(), "github.com/octo/".len());
    }

    #[test]
    fn test_click_outside_closes() {
        let mut p = picker(&["Alpha", "Beta"]);
        p.open_all();
        p.click_outside();
        assert!(!p.is_open());
        assert!(!p.is_focused());
        assert_eq!(p.text(), "github.com/octo/");
    }

    #[test]
    fn test_set_candidates_refilters() {
        let mut p = picker(&[]);
        type_str(&mut p, "/po");
        assert_eq!(p.view(), PickerView::Closed);

        p.set_candidates(vec!["Portfolio".to_string(), "Components".to_string()]);
        assert_eq!(p.candidates(), &["Portfolio"]);
        assert!(p.is_open());
    }

    #[test]
    fn test_paste_drops_control_chars() {
        let mut p = picker(&["Alpha"]);
        assert!(p.paste("/Al\n"));
        assert_eq!(p.text(), "github.com/octo/Al");
        assert!(p.is_open());
    }

    #[test]
    fn test_browser_url_adds_scheme() {
        let mut p = picker(&["Alpha"]);
        p.set_text("github.com/octo/Alpha");
        assert_eq!(
            p.browser_url().unwrap().as_str(),
            "https://github.com/octo/Alpha"
        );
    }
}
