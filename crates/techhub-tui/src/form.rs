//! Single-line text field buffer for the form screens.

/// One editable field. Append-only cursor (end of line), which matches
/// the short inputs these forms take.
#[derive(Debug, Default, Clone)]
pub struct FieldBuffer {
    value: String,
}

impl FieldBuffer {
    pub fn push_char(&mut self, c: char) {
        // Control characters come through crossterm as Char events too.
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Mask for password display: one bullet per char.
    pub fn masked(&self) -> String {
        "•".repeat(self.value.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_append_and_remove_at_end() {
        let mut field = FieldBuffer::default();
        field.push_char('a');
        field.push_char('b');
        field.backspace();
        field.push_char('c');
        assert_eq!(field.value(), "ac");
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut field = FieldBuffer::default();
        field.push_char('\t');
        field.push_char('\u{7f}');
        assert!(field.is_empty());
    }

    #[test]
    fn mask_counts_chars_not_bytes() {
        let mut field = FieldBuffer::default();
        field.push_char('å');
        field.push_char('b');
        assert_eq!(field.masked(), "••");
    }
}
