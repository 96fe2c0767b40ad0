//! Single-line text input for the palette query.
//!
//! The cursor is a character index, so multi-byte input edits correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable query text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position, in characters.
    cursor: usize,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.char_len() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
                false
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clear();
                    true
                }
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return false;
                }
                let end = self.byte_index(self.cursor);
                let before = self.value[..end].trim_end();
                let start = before
                    .char_indices()
                    .rfind(|(_, c)| c.is_whitespace())
                    .map(|(i, c)| i + c.len_utf8())
                    .unwrap_or(0);
                self.value.replace_range(start..end, "");
                self.cursor = self.value[..start].chars().count();
                true
            }
            _ => false,
        }
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}
