//! Editable text buffer with a byte-offset cursor.

/// Text value of one input plus its cursor.
///
/// Editing methods return `true` when the value changed, so the form can
/// tell an edit (a change event) from a cursor move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position within `value` (byte offset, always on a char boundary)
    cursor: usize,
}

impl TextInput {
    /// Create an empty input.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor byte offset.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value and put the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Empty the value.
    pub fn clear(&mut self) -> bool {
        let changed = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        changed
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) -> bool {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        let Some((prev, _)) = self.value[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.value.remove(prev);
        self.cursor = prev;
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }

    /// Delete the word before the cursor, along with whitespace after it.
    pub fn delete_word(&mut self) -> bool {
        let before = &self.value[..self.cursor];
        let word_end = before.trim_end().len();
        let start = before[..word_end]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        if start == self.cursor {
            return false;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Move one character left.
    pub fn cursor_left(&mut self) {
        self.cursor = self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
    }

    /// Move one character right.
    pub fn cursor_right(&mut self) {
        self.cursor = self.value[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8());
    }

    /// Move to the start of the current line.
    pub fn cursor_home(&mut self) {
        self.cursor = self.value[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    /// Move to the end of the current line.
    pub fn cursor_end(&mut self) {
        let rest = &self.value[self.cursor..];
        self.cursor += rest.find('\n').unwrap_or(rest.len());
    }

    /// Value with a `│` marker at the cursor, for rendering.
    #[must_use]
    pub fn with_cursor_marker(&self) -> String {
        let (before, after) = self.value.split_at(self.cursor);
        format!("{before}│{after}")
    }
}
