//! Input field handling for the terminal user interface.

/// A text input field with a char-indexed cursor and active state.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    /// Byte offset of the cursor into the value.
    fn byte_cursor(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_cursor();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_cursor();
            self.value.remove(at);
        }
    }

    /// Delete the character at the cursor position.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_cursor();
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor one position to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Reset the field to empty.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the current value, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_respect_char_boundaries() {
        let mut field = InputField::with_value("gü");
        field.insert_char('n');
        assert_eq!(field.value, "gün");
        field.backspace();
        field.backspace();
        assert_eq!(field.value, "g");
        assert_eq!(field.cursor, 1);
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut field = InputField::with_value("abc");
        field.cursor = 0;
        field.delete();
        assert_eq!(field.value, "bc");
        field.move_right();
        field.move_right();
        field.delete();
        assert_eq!(field.value, "bc");
    }

    #[test]
    fn test_take_leaves_field_empty() {
        let mut field = InputField::with_value("done");
        assert_eq!(field.take(), "done");
        assert!(field.value.is_empty());
        assert_eq!(field.cursor, 0);
    }
}
