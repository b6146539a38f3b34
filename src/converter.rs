//! Converter - renders addressed elements back to XML text
//!
//! Output is compact: no indentation, no self-closing tags. Text is escaped;
//! attribute values are written as stored.

use crate::accessor::Accessor;
use crate::core::entities::escape_text;
use crate::dom::Element;
use crate::error::Result;
use tracing::trace;

/// Standard declaration prefixed by `make_document(true)`
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Renders an accessor as an XML document
pub struct Converter<'a> {
    accessor: &'a Accessor,
}

impl<'a> Converter<'a> {
    pub fn new(accessor: &'a Accessor) -> Self {
        Converter { accessor }
    }

    /// Render every addressed element in order
    ///
    /// Fails with the held error when the accessor is in its error state.
    pub fn make_document(&self, with_declaration: bool) -> Result<String> {
        let elements = match self.accessor {
            Accessor::Error(error) => return Err(error.clone()),
            accessor => accessor.all().unwrap_or_default(),
        };

        let mut doc = String::with_capacity(256);
        if with_declaration {
            doc.push_str(XML_DECLARATION);
        }
        for element in &elements {
            write_element(&mut doc, element);
        }

        trace!(elements = elements.len(), bytes = doc.len(), "rendered document");
        Ok(doc)
    }
}

enum Pending {
    Open(Element),
    Close(String),
}

/// Append one element and its subtree; the document root contributes only
/// its children
fn write_element(out: &mut String, element: &Element) {
    let mut stack = vec![Pending::Open(element.clone())];

    while let Some(next) = stack.pop() {
        let element = match next {
            Pending::Open(element) => element,
            Pending::Close(name) => {
                out.push_str("</");
                out.push_str(&name);
                out.push('>');
                continue;
            }
        };

        if !element.is_document_root() {
            let name = element.name();
            out.push('<');
            out.push_str(&name);
            for (key, value) in element.attributes() {
                out.push(' ');
                out.push_str(&key);
                out.push_str("=\"");
                out.push_str(&value);
                out.push('"');
            }
            out.push('>');

            if let Some(text) = element.text() {
                out.push_str(&escape_text(&text));
            }
            stack.push(Pending::Close(name));
        }
        stack.extend(element.children().into_iter().rev().map(Pending::Open));
    }
}
