//! Tree Builder
//!
//! Implements EventHandler to assemble an element tree under a synthetic
//! document root. A terminal parse error makes the whole result an error,
//! however much of the tree was already built.

use super::element::Element;
use crate::accessor::Accessor;
use crate::core::attributes::Attribute;
use crate::core::tokenizer::ParseError;
use crate::error::XmlError;
use crate::options::ParseOptions;
use crate::reader::{dispatch, EventHandler, ParseEvent};
use tracing::warn;

/// Builds an element tree from parse events
pub struct TreeBuilder {
    root: Element,
    /// Open elements, innermost last; never includes the root
    stack: Vec<Element>,
    options: ParseOptions,
    error: Option<ParseError>,
    element_count: usize,
}

impl TreeBuilder {
    /// Create a builder holding an empty document root
    pub fn new(options: &ParseOptions) -> Self {
        TreeBuilder {
            root: Element::document_root(options.ignore_namespaces),
            stack: Vec::with_capacity(16),
            options: options.clone(),
            error: None,
            element_count: 0,
        }
    }

    /// Number of elements created so far, excluding the root
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// The recorded terminal error, if any
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    fn current(&self) -> &Element {
        self.stack.last().unwrap_or(&self.root)
    }

    /// Finish building: the document root, or the recorded error
    pub fn finish(self) -> Accessor {
        match self.error {
            Some(error) => Accessor::Error(XmlError::Parse(error)),
            None => Accessor::Single(self.root),
        }
    }

    /// Run a builder over `events` and finish it
    pub fn build<'a, I>(events: I, options: &ParseOptions) -> (Accessor, usize)
    where
        I: IntoIterator<Item = ParseEvent<'a>>,
    {
        let mut builder = TreeBuilder::new(options);
        dispatch(events, &mut builder);
        let count = builder.element_count();
        (builder.finish(), count)
    }
}

impl EventHandler for TreeBuilder {
    fn element_start(&mut self, name: &str, attributes: &[Attribute<'_>], line: Option<usize>) {
        if self.error.is_some() {
            return;
        }

        let element = Element::new(name);
        element.set_ignore_namespaces(self.options.ignore_namespaces);
        element.set_line_start(line);
        if !attributes.is_empty() {
            element.set_attributes(
                attributes
                    .iter()
                    .map(|a| (a.name.to_string(), a.value.to_string()))
                    .collect(),
            );
        }

        self.current().append_child(&element);
        self.stack.push(element);
        self.element_count += 1;
    }

    fn character_data(&mut self, text: &str) {
        if self.error.is_none() {
            self.current().push_text(text);
        }
    }

    fn cdata(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            self.current().set_cdata(bytes);
        }
    }

    fn element_end(&mut self, _name: &str, line: Option<usize>) {
        if self.error.is_some() {
            return;
        }

        if let Some(element) = self.stack.pop() {
            if let Some(trimming) = &self.options.trimming {
                element.trim_text(trimming);
            }
            element.set_line_end(line);
        }
    }

    fn parse_error(&mut self, error: ParseError) {
        if self.error.is_none() {
            warn!(
                reason = %error.message,
                position = error.position,
                line = ?error.line,
                "document could not be parsed"
            );
            self.error = Some(error);
        }
    }
}
