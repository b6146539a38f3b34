//! XML Tokenizer - State machine for XML token extraction
//!
//! Implements a pull-parser style tokenizer that extracts XML tokens:
//! - Element start/end tags
//! - Text content
//! - CDATA sections
//! - Comments
//! - Processing instructions
//!
//! The tokenizer checks well-formedness of each individual construct
//! (names, attribute syntax, legal characters, entity references). Checks
//! that span several tokens, such as tag nesting, live in the reader.

use super::attributes::{parse_attributes, Attribute};
use super::entities::{decode_content, normalize_line_ends, validate_xml_content};
use super::scanner::Scanner;
use std::borrow::Cow;

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Initial state before parsing starts
    Init,
    /// Between constructs
    InsideText,
    /// End of input reached or an error was recorded
    Done,
}

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
    /// End of file
    Eof,
}

/// A parsed XML token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// Line (1-based) where the token starts
    pub line: usize,
    /// For tags and PIs: the name
    pub name: Option<&'a str>,
    /// For text/cdata/comments: the content (owned if entities were decoded)
    pub content: Option<Cow<'a, str>>,
    /// For start and empty tags: the attributes
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize), line: usize) -> Self {
        Token {
            kind,
            span,
            line,
            name: None,
            content: None,
            attributes: Vec::new(),
        }
    }

    fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: Cow<'a, str>) -> Self {
        self.content = Some(content);
        self
    }

    fn with_attributes(mut self, attributes: Vec<Attribute<'a>>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A terminal, non-recoverable failure reported while reading a document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", line_suffix(.line))]
pub struct ParseError {
    pub message: String,
    /// Byte offset of the offending construct
    pub position: usize,
    /// Line (1-based) of the offending construct, if known
    pub line: Option<usize>,
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    input: &'a str,
    scanner: Scanner<'a>,
    state: ParseState,
    error: Option<ParseError>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            scanner: Scanner::new(input.as_bytes()),
            state: ParseState::Init,
            error: None,
        }
    }

    /// Get any parse error
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Take the parse error, leaving none behind
    pub fn take_error(&mut self) -> Option<ParseError> {
        self.error.take()
    }

    /// Get the current parse state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Record the first error and stop tokenizing
    fn fail(&mut self, message: impl Into<String>, position: usize) -> Option<Token<'a>> {
        if self.error.is_none() {
            let line = self.scanner.line_at(position);
            self.error = Some(ParseError::new(message, position).at_line(line));
        }
        self.state = ParseState::Done;
        None
    }

    /// Get the next token, or None if at end of input or after an error
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.state == ParseState::Done {
            return None;
        }

        if self.state == ParseState::Init {
            // A byte order mark that survived decoding is not content
            if self.scanner.starts_with("\u{FEFF}".as_bytes()) {
                self.scanner.advance(3);
            }
            self.state = ParseState::InsideText;
        }

        match self.scanner.peek() {
            Some(b'<') => self.parse_markup(),
            Some(_) => self.parse_text(),
            None => {
                self.state = ParseState::Done;
                let pos = self.scanner.position();
                let line = self.scanner.line_at(pos);
                Some(Token::new(TokenKind::Eof, (pos, pos), line))
            }
        }
    }

    /// Parse character data up to the next '<'
    fn parse_text(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        let end = self.scanner.find_tag_start().unwrap_or(self.input.len());
        let raw = &self.input[start..end];

        if let Err(msg) = validate_xml_content(raw) {
            return self.fail(msg, start);
        }
        if raw.contains("]]>") {
            return self.fail("Sequence ']]>' not allowed in content", start);
        }
        let content = match decode_content(raw) {
            Ok(content) => content,
            Err(msg) => return self.fail(msg, start),
        };

        self.scanner.set_position(end);
        let line = self.scanner.line_at(start);
        Some(Token::new(TokenKind::Text, (start, end), line).with_content(content))
    }

    /// Parse markup starting with '<'
    fn parse_markup(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();

        if self.scanner.starts_with(b"</") {
            self.parse_end_tag(start)
        } else if self.scanner.starts_with(b"<!--") {
            self.parse_comment(start)
        } else if self.scanner.starts_with(b"<![CDATA[") {
            self.parse_cdata(start)
        } else if self.scanner.starts_with(b"<!DOCTYPE") {
            self.parse_doctype(start)
        } else if self.scanner.starts_with(b"<!") {
            self.fail("Invalid declaration - expected comment, CDATA, or DOCTYPE", start)
        } else if self.scanner.starts_with(b"<?") {
            self.parse_pi(start)
        } else {
            self.parse_start_tag(start)
        }
    }

    /// Parse a start tag or empty element tag
    fn parse_start_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '<'

        if self.scanner.read_name().is_none() {
            let message = if self.scanner.is_eof() {
                "Unexpected end of input in tag"
            } else {
                "Invalid element name: must start with letter, underscore, or colon"
            };
            return self.fail(message, start);
        }
        let name_end = self.scanner.position();

        // Find the end of the tag, handling quoted attributes
        let end = match self.scanner.find_tag_end_quoted() {
            Some(end) => end,
            None => return self.fail("Unexpected end of input in start tag", start),
        };

        let is_empty = end > name_end && self.input.as_bytes()[end - 1] == b'/';
        let attr_end = if is_empty { end - 1 } else { end };

        let attributes = match parse_attributes(&self.input[name_end..attr_end]) {
            Ok(attributes) => attributes,
            Err(msg) => return self.fail(msg, start),
        };

        self.scanner.set_position(end + 1);
        let line = self.scanner.line_at(start);

        let kind = if is_empty { TokenKind::EmptyTag } else { TokenKind::StartTag };
        Some(
            Token::new(kind, (start, end + 1), line)
                .with_name(self.name_str(start + 1, name_end))
                .with_attributes(attributes),
        )
    }

    /// Parse an end tag
    fn parse_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(2); // Skip '</'

        if self.scanner.read_name().is_none() {
            return self.fail(
                "Invalid element name in end tag: must start with letter, underscore, or colon",
                start,
            );
        }
        let name_end = self.scanner.position();

        // End tag can only have whitespace after name, not attributes
        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some(b'>') => {}
            Some(_) => return self.fail("End tag cannot have attributes or other content", start),
            None => return self.fail("Unexpected end of input in end tag", start),
        }

        self.scanner.advance(1);
        let end = self.scanner.position();
        let line = self.scanner.line_at(start);

        Some(Token::new(TokenKind::EndTag, (start, end), line).with_name(self.name_str(start + 2, name_end)))
    }

    /// Parse a comment <!--...-->
    fn parse_comment(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(4); // Skip '<!--'
        let content_start = self.scanner.position();

        let close = match self.scanner.find_sequence(b"-->") {
            Some(close) => close,
            None => return self.fail("Unterminated comment", start),
        };

        let content = &self.input[content_start..close];
        if let Err(msg) = validate_xml_content(content) {
            return self.fail(msg, start);
        }
        if content.contains("--") || content.ends_with('-') {
            return self.fail("'--' not allowed in comment", start);
        }

        self.scanner.set_position(close + 3);
        let line = self.scanner.line_at(start);
        Some(
            Token::new(TokenKind::Comment, (start, close + 3), line)
                .with_content(Cow::Borrowed(content)),
        )
    }

    /// Parse a CDATA section <![CDATA[...]]>
    fn parse_cdata(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(9); // Skip '<![CDATA['
        let content_start = self.scanner.position();

        let close = match self.scanner.find_sequence(b"]]>") {
            Some(close) => close,
            None => return self.fail("Unterminated CDATA section", start),
        };

        let content = &self.input[content_start..close];
        if let Err(msg) = validate_xml_content(content) {
            return self.fail(msg, start);
        }

        self.scanner.set_position(close + 3);
        let line = self.scanner.line_at(start);
        Some(
            Token::new(TokenKind::CData, (start, close + 3), line)
                .with_content(normalize_line_ends(content)),
        )
    }

    /// Parse a DOCTYPE declaration, skipping any internal subset
    fn parse_doctype(&mut self, start: usize) -> Option<Token<'a>> {
        let bytes = self.input.as_bytes();
        let mut pos = start + 9; // Skip '<!DOCTYPE'
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        while pos < bytes.len() {
            let b = bytes[pos];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None => match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'[' => depth += 1,
                    b']' => depth = depth.saturating_sub(1),
                    b'>' if depth == 0 => {
                        self.scanner.set_position(pos + 1);
                        let line = self.scanner.line_at(start);
                        return Some(Token::new(TokenKind::DocType, (start, pos + 1), line));
                    }
                    _ => {}
                },
            }
            pos += 1;
        }

        self.fail("Unterminated DOCTYPE declaration", start)
    }

    /// Parse a processing instruction or the XML declaration
    fn parse_pi(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(2); // Skip '<?'

        if self.scanner.read_name().is_none() {
            return self.fail("Invalid processing instruction target", start);
        }
        let target = self.name_str(start + 2, self.scanner.position());

        let close = match self.scanner.find_sequence(b"?>") {
            Some(close) => close,
            None => return self.fail("Unterminated processing instruction", start),
        };

        let kind = if target == "xml" {
            // Only a leading BOM may precede the declaration
            let leading = &self.input[..start];
            if !leading.is_empty() && leading != "\u{FEFF}" {
                return self.fail(
                    "XML declaration allowed only at the start of the document",
                    start,
                );
            }
            TokenKind::XmlDeclaration
        } else if target.eq_ignore_ascii_case("xml") {
            return self.fail("Processing instruction target 'xml' is reserved", start);
        } else {
            TokenKind::ProcessingInstruction
        };

        let data = &self.input[self.scanner.position()..close];
        if let Err(msg) = validate_xml_content(data) {
            return self.fail(msg, start);
        }

        self.scanner.set_position(close + 2);
        let line = self.scanner.line_at(start);
        Some(
            Token::new(kind, (start, close + 2), line)
                .with_name(target)
                .with_content(Cow::Borrowed(data.trim_start())),
        )
    }

    /// Names end at ASCII delimiters, so these offsets are char boundaries
    fn name_str(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }
}
