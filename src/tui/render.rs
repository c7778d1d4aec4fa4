// src/tui/render.rs
// =============================================================================
// Drawing the landing page with ratatui.
//
// Layout (centered column):
//
//     Isaac S.Silva
//     FullStack Developer, focused on BackEnd
//
//     ┌──────────────────────────────┐
//     │github.com/IsaacSSilva/       │
//     └──────────────────────────────┘
//     press ctrl+/ for the repos ...     <- dropdown draws over this
//
// draw() returns the rectangles it used so mouse clicks can be matched
// against the field, the dropdown and each dropdown row.
// =============================================================================

use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use super::app::App;
use crate::picker::{PathPicker, PickerView};
use crate::source::RepoSource;

const COLUMN_WIDTH: u16 = 64;
const DROPDOWN_ROWS: u16 = 8;

const HINTS: &str = "press ctrl+/ for the repos · ctrl+o open · ctrl+r reload · ctrl+c quit";

/// What a mouse position landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Hit {
    Field,
    Row(usize),
    // Dropdown border or the "no repositories" panel
    Dropdown,
    Outside,
}

#[derive(Debug, Clone, Default)]
pub(super) struct HitAreas {
    pub(super) field: Option<Rect>,
    pub(super) dropdown: Option<Rect>,
    // (row area, candidate index) for every visible dropdown row
    pub(super) rows: Vec<(Rect, usize)>,
}

impl HitAreas {
    pub(super) fn hit(&self, pos: Position) -> Hit {
        if let Some((_, index)) = self.rows.iter().find(|(rect, _)| rect.contains(pos)) {
            return Hit::Row(*index);
        }
        if self.dropdown.is_some_and(|rect| rect.contains(pos)) {
            return Hit::Dropdown;
        }
        if self.field.is_some_and(|rect| rect.contains(pos)) {
            return Hit::Field;
        }
        Hit::Outside
    }
}

pub(super) fn draw(frame: &mut Frame, app: &App) -> HitAreas {
    let column = centered_column(frame.area(), COLUMN_WIDTH);
    let [_, title, tagline, _, field, hint, below, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(DROPDOWN_ROWS + 1),
        Constraint::Fill(1),
    ])
    .areas(column);

    frame.render_widget(
        Paragraph::new(Span::styled(
            app.profile.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title,
    );
    frame.render_widget(Paragraph::new(tagline_line(&app.profile.tagline)), tagline);

    let mut hits = HitAreas::default();

    if app.is_ready() {
        draw_field(frame, field, &app.picker);
        hits.field = Some(field);
    } else {
        draw_placeholder(frame, field, &app.source);
    }

    let hint_text = app.status.as_deref().unwrap_or(HINTS);
    frame.render_widget(
        Paragraph::new(hint_text).style(Style::default().fg(Color::DarkGray)),
        hint,
    );

    if app.is_ready() && app.picker.view() != PickerView::Closed {
        let area = Rect {
            height: hint.height + below.height,
            ..hint
        };
        draw_dropdown(frame, area, &app.picker, &mut hits);
    }

    hits
}

fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

// First word highlighted, like the gradient on the web version's "FullStack"
fn tagline_line(tagline: &str) -> Line<'_> {
    let accent = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    match tagline.split_once(' ') {
        Some((first, rest)) => Line::from(vec![
            Span::styled(first, accent),
            Span::raw(" "),
            Span::raw(rest),
        ]),
        None => Line::from(Span::styled(tagline, accent)),
    }
}

fn draw_field(frame: &mut Frame, area: Rect, picker: &PathPicker) {
    let border = if picker.is_focused() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);

    let (visible, column) = scroll_to_caret(picker.text(), picker.cursor(), inner.width);
    frame.render_widget(Paragraph::new(visible).block(block), area);

    if picker.is_focused() {
        frame.set_cursor_position(Position::new(inner.x.saturating_add(column), inner.y));
    }
}

// Cuts the front off `text` so the caret (a char index) fits in `width` cells
//
// Returns the visible tail and the caret's column inside it. Widths are
// display cells, so CJK and emoji count as two.
fn scroll_to_caret(text: &str, cursor: usize, width: u16) -> (&str, u16) {
    let last_column = usize::from(width.saturating_sub(1));
    let caret: usize = text
        .chars()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0))
        .sum();

    let mut skipped = 0;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if caret - skipped <= last_column {
            break;
        }
        skipped += c.width().unwrap_or(0);
        start = i + c.len_utf8();
    }

    let column = u16::try_from(caret - skipped).unwrap_or(width.saturating_sub(1));
    (&text[start..], column)
}

// Disabled stand-in for the field while loading or after an error
fn draw_placeholder(frame: &mut Frame, area: Rect, source: &RepoSource) {
    let (text, style) = match source.error() {
        Some(error) => (
            format!("{} (ctrl+r to retry)", error),
            Style::default().fg(Color::Red),
        ),
        None => (
            "loading repositories...".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn draw_dropdown(frame: &mut Frame, area: Rect, picker: &PathPicker, hits: &mut HitAreas) {
    let candidates = picker.candidates();
    let max_rows = area.height.saturating_sub(2).max(1);
    let rows = u16::try_from(candidates.len())
        .unwrap_or(u16::MAX)
        .clamp(1, max_rows);
    let rect = Rect {
        height: (rows + 2).min(area.height),
        ..area
    };

    frame.render_widget(Clear, rect);
    hits.dropdown = Some(rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if picker.view() == PickerView::OpenEmpty {
        frame.render_widget(
            Paragraph::new("no repositories found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            rect,
        );
        return;
    }

    let inner = block.inner(rect);
    let visible = usize::from(inner.height);
    let offset = match picker.highlight() {
        Some(h) if h >= visible => h + 1 - visible,
        _ => 0,
    };

    let prefix = format!("{}/", picker.base());
    let items: Vec<ListItem> = candidates
        .iter()
        .map(|name| {
            let mut spans = vec![
                Span::styled(prefix.clone(), Style::default().fg(Color::DarkGray)),
                Span::styled(name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            ];
            if picker.is_current(name) {
                spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Green)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default()
        .with_offset(offset)
        .with_selected(picker.highlight());
    frame.render_stateful_widget(list, rect, &mut state);

    for (row, index) in (offset..candidates.len()).take(visible).enumerate() {
        let y = inner.y + u16::try_from(row).unwrap_or(u16::MAX);
        hits.rows.push((Rect::new(inner.x, y, inner.width, 1), index));
    }
}
