// src/picker/input.rs
// =============================================================================
// A single-line text buffer that always starts with a fixed base path.
//
// Every edit is computed on a copy first and only committed if the result
// still starts with the base path, so the prefix can't be deleted or split
// no matter where the caret is.
//
// The caret is a *char* index, not a byte index: repository names are ASCII,
// but anything can be pasted into the field.
// =============================================================================

#[derive(Debug, Clone)]
pub(super) struct PathInput {
    base: String,
    buf: String,
    cursor: usize,
}

impl PathInput {
    pub(super) fn new(base: String) -> Self {
        let cursor = base.chars().count();
        Self {
            buf: base.clone(),
            base,
            cursor,
        }
    }

    pub(super) fn base(&self) -> &str {
        &self.base
    }

    pub(super) fn text(&self) -> &str {
        &self.buf
    }

    pub(super) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(super) fn is_at_base(&self) -> bool {
        self.buf == self.base
    }

    /// Replaces the whole text and moves the caret to the end.
    pub(super) fn set(&mut self, text: String) -> bool {
        let cursor = text.chars().count();
        self.commit(text, cursor)
    }

    pub(super) fn insert_str(&mut self, s: &str) -> bool {
        let mut next = self.buf.clone();
        next.insert_str(self.byte_offset(self.cursor), s);
        self.commit(next, self.cursor + s.chars().count())
    }

    pub(super) fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        let mut next = self.buf.clone();
        next.replace_range(start..end, "");
        self.commit(next, self.cursor - 1)
    }

    pub(super) fn delete(&mut self) -> bool {
        if self.cursor >= self.buf.chars().count() {
            return false;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        let mut next = self.buf.clone();
        next.replace_range(start..end, "");
        self.commit(next, self.cursor)
    }

    pub(super) fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(super) fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buf.chars().count());
    }

    // Home lands right after the base path; nothing before it is editable
    pub(super) fn move_home(&mut self) {
        self.cursor = self.base.chars().count();
    }

    pub(super) fn move_end(&mut self) {
        self.cursor = self.buf.chars().count();
    }

    fn commit(&mut self, next: String, cursor: usize) -> bool {
        if !next.starts_with(&self.base) {
            return false;
        }
        self.buf = next;
        self.cursor = cursor;
        true
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buf
            .char_indices()
            .nth(char_idx)
            .map_or(self.buf.len(), |(i, _)| i)
    }
}
