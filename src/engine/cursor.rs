//! The sole mutable state of a parse: an offset into a borrowed input text.

/// A scan position over an immutable input string.
///
/// `pos` is a byte offset and always sits on a character boundary, with
/// `0 <= pos <= text.len()`. The position only moves forward, except when a
/// backtracking primitive restores a previously saved mark. The input is
/// borrowed, never copied.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(text: &'s str) -> Self {
        Self { text, pos: 0 }
    }

    /// The full input text this cursor scans.
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Current byte offset into the input.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The unconsumed tail of the input.
    pub fn remainder(&self) -> &'s str {
        &self.text[self.pos..]
    }

    /// Returns the character at the current position without advancing, or
    /// `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// Returns the character starting at an arbitrary byte offset. `None` if
    /// the offset is past the end or not on a character boundary.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..)?.chars().next()
    }

    /// Consumes and returns one character, or `None` at end of input.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes `literal` if the unconsumed input starts with it, returning
    /// the matched slice of the input. Leaves the position unchanged
    /// otherwise.
    pub fn consume(&mut self, literal: &str) -> Option<&'s str> {
        if !self.remainder().starts_with(literal) {
            return None;
        }
        let matched = &self.text[self.pos..self.pos + literal.len()];
        self.pos += literal.len();
        Some(matched)
    }

    /// Captures the current position for a later [`Cursor::restore`].
    pub fn save(&self) -> usize {
        self.pos
    }

    /// Resets the position to a previously saved mark.
    pub fn restore(&mut self, mark: usize) {
        debug_assert!(
            mark <= self.text.len() && self.text.is_char_boundary(mark),
            "restore mark {mark} is not a valid offset into the input"
        );
        self.pos = mark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn advance_returns_consumed_char() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn advance_handles_multibyte_chars() {
        let mut cursor = Cursor::new("é1");
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.peek(), Some('1'));
    }

    #[test]
    fn save_and_restore_round_trip() {
        let mut cursor = Cursor::new("abc");
        let mark = cursor.save();
        cursor.advance();
        cursor.advance();
        cursor.restore(mark);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.peek(), Some('a'));
    }

    #[test]
    fn consume_matches_full_literal_only() {
        let mut cursor = Cursor::new("foobar");
        assert_eq!(cursor.consume("bar"), None);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.consume("foo"), Some("foo"));
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.remainder(), "bar");
    }

    #[test]
    fn peek_at_end_is_none() {
        let cursor = Cursor::new("");
        assert_eq!(cursor.peek(), None);
        assert!(cursor.is_at_end());
    }
}
