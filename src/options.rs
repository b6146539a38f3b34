//! Parse configuration

/// Character set trimmed from both ends of each element's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trimming {
    /// Unicode white space, not including line terminators
    Whitespace,
    /// Unicode white space and line terminators
    WhitespaceAndNewlines,
    /// Line terminators only
    Newlines,
    /// An explicit set of characters
    Chars(Vec<char>),
}

impl Trimming {
    /// Whether `c` belongs to this character set
    pub fn contains(&self, c: char) -> bool {
        match self {
            Trimming::Whitespace => c.is_whitespace() && !is_newline(c),
            Trimming::WhitespaceAndNewlines => c.is_whitespace(),
            Trimming::Newlines => is_newline(c),
            Trimming::Chars(chars) => chars.contains(&c),
        }
    }

    /// Strip members of this set from both ends of `text`
    pub fn trim<'t>(&self, text: &'t str) -> &'t str {
        text.trim_matches(|c| self.contains(c))
    }
}

fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Options for building a tree from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Trim each element's text when the element ends
    pub trimming: Option<Trimming>,
    /// Match child names by local part only in name lookups
    pub ignore_namespaces: bool,
}

impl ParseOptions {
    /// Default options: no trimming, namespace prefixes significant
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim element text with the given character set
    pub fn with_trimming(mut self, trimming: Trimming) -> Self {
        self.trimming = Some(trimming);
        self
    }

    /// Enable or disable namespace-insensitive name lookups
    pub fn ignore_namespaces(mut self, enabled: bool) -> Self {
        self.ignore_namespaces = enabled;
        self
    }
}
