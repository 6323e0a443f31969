//! Text input field handling.

/// State for a single-line text input field.
///
/// The cursor is a character index, so multi-byte input (addresses with
/// accents) is edited correctly.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    /// Creates a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the beginning.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set(&mut self, text: &str) {
        *self = Self::with_text(text);
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_multibyte_text() {
        let mut input = TextInput::with_text("Calle Sol");
        input.move_home();
        input.insert('ñ');
        assert_eq!(input.as_str(), "ñCalle Sol");
        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "ñCalle So");
        input.move_home();
        input.delete();
        assert_eq!(input.as_str(), "Calle So");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = TextInput::new();
        input.move_left();
        input.backspace();
        input.delete();
        assert_eq!(input.cursor(), 0);
        input.insert('4');
        input.move_right();
        assert_eq!(input.cursor(), 1);
        input.set("12");
        assert_eq!(input.cursor(), 2);
    }
}
