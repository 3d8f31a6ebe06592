//! Position tracking over the parser's input.

/// Characters skippable between tokens.
pub(crate) const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// A byte offset into borrowed source text.
///
/// The offset only ever moves forward and always sits on a `char` boundary:
/// at the start of a token, on whitespace, or at end of input.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Consume `expected` if it is the next character.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `word` if the remaining input starts with it.
    pub(crate) fn eat_str(&mut self, word: &str) -> bool {
        if self.src[self.pos..].starts_with(word) {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start_matches(WHITESPACE).len();
    }

    /// Consume the longest run of characters matching `pred` and return it.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let rest = &self.src[start..];
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &self.src[start..start + len]
    }

    /// Consume everything up to the next `delim` and the delimiter itself,
    /// returning the text in between. Leaves the cursor untouched and returns
    /// `None` when `delim` never occurs.
    pub(crate) fn take_until(&mut self, delim: char) -> Option<&'a str> {
        let start = self.pos;
        let len = self.src[start..].find(delim)?;
        self.pos = start + len + delim.len_utf8();
        Some(&self.src[start..start + len])
    }
}
