//! SIMD-accelerated XML scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration.
//! The scanner also keeps a running 1-based line number so that events can
//! report where an element started and ended.

use memchr::{memchr, memchr_iter};

/// Scanner for XML delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    /// Line number at `line_pos`
    line: usize,
    /// Position up to which newlines have been counted
    line_pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner {
            input,
            pos: 0,
            line: 1,
            line_pos: 0,
        }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Skip whitespace characters (space, tab, newline, carriage return)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Line number (1-based) of byte offset `pos`.
    ///
    /// Offsets are expected to be queried in non-decreasing order, which is
    /// how the tokenizer walks the input; counting restarts from the top
    /// otherwise.
    pub fn line_at(&mut self, pos: usize) -> usize {
        let pos = pos.min(self.input.len());
        if pos < self.line_pos {
            self.line = 1;
            self.line_pos = 0;
        }
        self.line += memchr_iter(b'\n', &self.input[self.line_pos..pos]).count();
        self.line_pos = pos;
        self.line
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find tag end while handling quotes properly
    /// Returns the position of '>' that is not inside quotes
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut in_single_quote = false;
        let mut in_double_quote = false;

        while pos < self.input.len() {
            match self.input[pos] {
                b'"' if !in_single_quote => in_double_quote = !in_double_quote,
                b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
                b'>' if !in_single_quote && !in_double_quote => return Some(pos),
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Find the next occurrence of `needle`, returning its start position
    pub fn find_sequence(&self, needle: &[u8]) -> Option<usize> {
        let first = *needle.first()?;
        let mut pos = self.pos;
        while let Some(i) = memchr(first, &self.input[pos..]) {
            let at = pos + i;
            if self.input[at..].starts_with(needle) {
                return Some(at);
            }
            pos = at + 1;
        }
        None
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Read an XML name (starts with letter/underscore/colon, continues with
    /// letters/digits/hyphens/underscores/periods/colons)
    pub fn read_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        let first = *self.input.get(start)?;
        if !is_name_start_char(first) {
            return None;
        }

        self.pos += 1;
        while self.pos < self.input.len() && is_name_char(self.input[self.pos]) {
            self.pos += 1;
        }

        Some(&self.input[start..self.pos])
    }
}

/// Check if byte is valid XML name start character
/// Allows ASCII letters, underscore, colon, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Check if byte is valid XML name character
/// Allows ASCII alphanumeric, punctuation, and non-ASCII (UTF-8 Unicode)
#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}
