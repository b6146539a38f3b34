//! Slice Reader
//!
//! Turns the token stream of an in-memory document into ordered parse
//! events. The tokenizer checks each construct on its own; this reader adds
//! the document-level rules: tags nest, there is exactly one root element,
//! and nothing but whitespace and misc markup appears outside it.

use super::events::ParseEvent;
use crate::core::tokenizer::{ParseError, TokenKind, Tokenizer};
use std::borrow::Cow;

/// Pull reader over a UTF-8 document
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
    /// Names of the currently open elements, innermost last
    open: Vec<&'a str>,
    /// End event owed for an empty-element tag
    pending_end: Option<(&'a str, usize)>,
    root_seen: bool,
    done: bool,
}

impl<'a> SliceReader<'a> {
    /// Create a new reader for the given input
    pub fn new(input: &'a str) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new(input),
            open: Vec::new(),
            pending_end: None,
            root_seen: false,
            done: false,
        }
    }

    /// Current element nesting depth
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Stop reading and report `message` as the terminal error
    fn fail(&mut self, message: impl Into<String>, at: (usize, usize)) -> Option<ParseEvent<'a>> {
        self.done = true;
        Some(ParseEvent::ParseError(ParseError::new(message, at.0).at_line(at.1)))
    }

    /// Get the next parse event
    pub fn next_event(&mut self) -> Option<ParseEvent<'a>> {
        if self.done {
            return None;
        }

        if let Some((name, line)) = self.pending_end.take() {
            return Some(self.close(name, line));
        }

        loop {
            let token = match self.tokenizer.next_token() {
                Some(token) => token,
                None => {
                    self.done = true;
                    return self.tokenizer.take_error().map(ParseEvent::ParseError);
                }
            };

            let at = (token.span.0, token.line);
            match token.kind {
                TokenKind::StartTag | TokenKind::EmptyTag => {
                    if self.open.is_empty() && self.root_seen {
                        return self.fail("Extra content at the end of the document", at);
                    }
                    let name = token.name.unwrap_or_default();
                    self.root_seen = true;
                    self.open.push(name);
                    if token.kind == TokenKind::EmptyTag {
                        self.pending_end = Some((name, token.line));
                    }
                    return Some(ParseEvent::ElementStart {
                        name: Cow::Borrowed(name),
                        attributes: token.attributes,
                        line: Some(token.line),
                    });
                }

                TokenKind::EndTag => {
                    let name = token.name.unwrap_or_default();
                    match self.open.last() {
                        None => {
                            let message = format!("Unexpected end tag: </{}>", name);
                            return self.fail(message, at);
                        }
                        Some(&current) if current != name => {
                            let message =
                                format!("Tag mismatch: <{}> closed with </{}>", current, name);
                            return self.fail(message, at);
                        }
                        Some(_) => return Some(self.close(name, token.line)),
                    }
                }

                TokenKind::Text => {
                    let content = token.content.unwrap_or_default();
                    if self.open.is_empty() {
                        if content.chars().all(is_xml_whitespace) {
                            continue;
                        }
                        return self.fail("Content not allowed outside the root element", at);
                    }
                    if !content.is_empty() {
                        return Some(ParseEvent::CharacterData(content));
                    }
                }

                TokenKind::CData => {
                    if self.open.is_empty() {
                        return self.fail("CDATA section not allowed at document level", at);
                    }
                    return Some(match token.content {
                        Some(Cow::Borrowed(s)) => ParseEvent::CData(Cow::Borrowed(s.as_bytes())),
                        Some(Cow::Owned(s)) => ParseEvent::CData(Cow::Owned(s.into_bytes())),
                        None => ParseEvent::CData(Cow::Borrowed(&[])),
                    });
                }

                TokenKind::DocType => {
                    if self.root_seen {
                        return self.fail("DOCTYPE not allowed after the root element", at);
                    }
                }

                TokenKind::Comment
                | TokenKind::ProcessingInstruction
                | TokenKind::XmlDeclaration => {}

                TokenKind::Eof => {
                    if let Some(&name) = self.open.last() {
                        let message = format!("Unclosed tag: <{}>", name);
                        return self.fail(message, at);
                    }
                    if !self.root_seen {
                        return self.fail("Document is empty", at);
                    }
                    self.done = true;
                    return None;
                }
            }
        }
    }

    fn close(&mut self, name: &'a str, line: usize) -> ParseEvent<'a> {
        self.open.pop();
        ParseEvent::ElementEnd {
            name: Cow::Borrowed(name),
            line: Some(line),
        }
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = ParseEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

#[inline]
fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Read all events of a document
pub fn parse_events(input: &str) -> Vec<ParseEvent<'_>> {
    SliceReader::new(input).collect()
}
