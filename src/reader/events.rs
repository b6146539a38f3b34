//! Parse Event Types
//!
//! The ordered structural events a document reader emits and the tree
//! builder consumes.

use crate::core::attributes::Attribute;
use crate::core::tokenizer::ParseError;
use std::borrow::Cow;

/// XML parsing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    /// Start of an element: <name attrs...>
    ElementStart {
        /// Full element name (may include prefix)
        name: Cow<'a, str>,
        /// Element attributes
        attributes: Vec<Attribute<'a>>,
        /// Source line, if known
        line: Option<usize>,
    },
    /// Character data directly inside the current element
    CharacterData(Cow<'a, str>),
    /// CDATA section payload
    CData(Cow<'a, [u8]>),
    /// End of an element: </name>
    ElementEnd {
        /// Full element name
        name: Cow<'a, str>,
        /// Source line, if known
        line: Option<usize>,
    },
    /// Terminal failure; no events follow it
    ParseError(ParseError),
}

impl<'a> ParseEvent<'a> {
    /// Start event without source position
    pub fn start<N, I, K, V>(name: N, attributes: I) -> Self
    where
        N: Into<Cow<'a, str>>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'a, str>>,
        V: Into<Cow<'a, str>>,
    {
        ParseEvent::ElementStart {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| Attribute::new(k, v))
                .collect(),
            line: None,
        }
    }

    /// Start event with no attributes
    pub fn open(name: impl Into<Cow<'a, str>>) -> Self {
        ParseEvent::ElementStart {
            name: name.into(),
            attributes: Vec::new(),
            line: None,
        }
    }

    /// End event without source position
    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        ParseEvent::ElementEnd {
            name: name.into(),
            line: None,
        }
    }

    /// Character data event
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        ParseEvent::CharacterData(text.into())
    }

    /// CDATA event
    pub fn cdata(bytes: impl Into<Cow<'a, [u8]>>) -> Self {
        ParseEvent::CData(bytes.into())
    }

    /// Terminal error event without source position
    pub fn error(reason: impl Into<String>) -> Self {
        ParseEvent::ParseError(ParseError::new(reason, 0))
    }

    /// Check if this is a start element event
    pub fn is_start_element(&self) -> bool {
        matches!(self, ParseEvent::ElementStart { .. })
    }

    /// Check if this is an end element event
    pub fn is_end_element(&self) -> bool {
        matches!(self, ParseEvent::ElementEnd { .. })
    }

    /// Check if this is the terminal error event
    pub fn is_error(&self) -> bool {
        matches!(self, ParseEvent::ParseError(_))
    }

    /// Element name for start and end events
    pub fn name(&self) -> Option<&str> {
        match self {
            ParseEvent::ElementStart { name, .. } | ParseEvent::ElementEnd { name, .. } => {
                Some(name.as_ref())
            }
            _ => None,
        }
    }
}
