use unicode_width::UnicodeWidthStr;

/// Longest address SMTP will carry (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Email entry field with a byte-indexed cursor on char boundaries.
///
/// Whitespace and control characters never make it into the text, and the
/// text is capped at [`MAX_EMAIL_LEN`] bytes.
#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `c` at the cursor. Returns `false` if the char was rejected.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_whitespace() || c.is_control() {
            return false;
        }
        if self.text.len() + c.len_utf8() > MAX_EMAIL_LEN {
            return false;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert pasted text, dropping whatever [`insert_char`](Self::insert_char)
    /// rejects. Surrounding whitespace from a copied address just vanishes.
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert_char(c);
        }
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Terminal columns occupied by the text left of the cursor.
    pub fn cursor_width(&self) -> usize {
        UnicodeWidthStr::width(&self.text[..self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputState {
        let mut input = InputState::new();
        for c in s.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn test_editing_respects_char_boundaries() {
        let mut input = typed("zoë@x.io");
        input.move_home();
        input.move_right();
        input.move_right();
        input.delete_forward();
        assert_eq!(input.text, "zo@x.io");
        assert_eq!(input.cursor_width(), 2);

        input.move_end();
        input.delete_back();
        input.delete_back();
        assert_eq!(input.text, "zo@x.");
    }

    #[test]
    fn test_cursor_width_counts_columns() {
        let mut input = typed("ünï");
        assert_eq!(input.cursor, "ünï".len());
        assert_eq!(input.cursor_width(), 3);
        input.move_left();
        assert_eq!(input.cursor_width(), 2);

        let mut input = typed("メール@例.jp");
        assert_eq!(input.cursor_width(), 12);
        input.move_home();
        input.move_right();
        assert_eq!(input.cursor_width(), 2);
    }

    #[test]
    fn test_whitespace_and_controls_are_rejected() {
        let mut input = InputState::new();
        assert!(!input.insert_char(' '));
        assert!(!input.insert_char('\t'));
        assert!(!input.insert_char('\u{7}'));
        assert!(input.insert_char('a'));
        assert_eq!(input.text, "a");
        assert_eq!(input.cursor, 1);

        input.insert_str("  b@c.d \n");
        assert_eq!(input.text, "ab@c.d");
        assert_eq!(input.cursor, input.text.len());
    }

    #[test]
    fn test_length_is_capped() {
        let mut input = InputState::new();
        input.insert_str(&"x".repeat(MAX_EMAIL_LEN + 10));
        assert_eq!(input.text.len(), MAX_EMAIL_LEN);
        assert!(!input.insert_char('y'));
        input.delete_back();
        assert!(!input.insert_char('é'), "two-byte char must not overflow");
        assert!(input.insert_char('y'));
        assert_eq!(input.text.len(), MAX_EMAIL_LEN);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = typed("a@b.c");
        input.clear();
        assert!(input.text.is_empty());
        assert_eq!(input.cursor, 0);
        input.delete_back();
        input.move_left();
        assert_eq!(input.cursor, 0);
    }
}
