//! xmlnav - XML trees with failure-propagating path navigation
//!
//! Layers:
//! - core: scanning, tokenizing, attributes, entities, encodings
//! - reader: ordered parse events with document-level checks
//! - dom: element tree and the event-driven tree builder
//! - accessor: Single / Many / Error navigation over the tree
//! - converter: rendering back to XML text
//!
//! ```
//! let xml = xmlnav::parse("<ResultSet><Result><Hit index=\"1\">a</Hit></Result></ResultSet>");
//! let hit = xml.path(xmlnav::path!["ResultSet", "Result", "Hit", 0]);
//! assert_eq!(hit.text().as_deref(), Some("a"));
//! assert_eq!(hit.attributes().get("index").map(String::as_str), Some("1"));
//! ```

pub mod accessor;
pub mod converter;
pub mod core;
pub mod dom;
pub mod error;
pub mod options;
pub mod reader;

pub use accessor::{Accessor, PathStep};
pub use converter::Converter;
pub use dom::{Attributes, Element};
pub use error::{ParseError, Result, XmlError};
pub use options::{ParseOptions, Trimming};
pub use reader::ParseEvent;

use crate::core::encoding::decode_to_utf8;
use dom::TreeBuilder;
use reader::SliceReader;
use tracing::{debug, instrument};

/// Parse a document with default options
pub fn parse(input: &str) -> Accessor {
    parse_with(input, &ParseOptions::default())
}

/// Parse a document into a tree rooted at the synthetic document root
///
/// Malformed input yields `Accessor::Error(XmlError::Parse(..))`.
#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse_with(input: &str, options: &ParseOptions) -> Accessor {
    debug!(
        trimming = ?options.trimming,
        ignore_namespaces = options.ignore_namespaces,
        "parsing document"
    );
    let (accessor, elements) = TreeBuilder::build(SliceReader::new(input), options);
    debug!(elements, failed = accessor.is_error(), "parsed document");
    accessor
}

/// Parse raw bytes, detecting UTF-8 or UTF-16 from the byte order mark
pub fn parse_bytes(input: &[u8], options: &ParseOptions) -> Accessor {
    match decode_to_utf8(input) {
        Ok(text) => parse_with(&text, options),
        Err(reason) => {
            debug!(%reason, "input is not decodable");
            Accessor::Error(XmlError::Encoding(reason))
        }
    }
}

/// Build a tree from any ordered event sequence
pub fn build<'a, I>(events: I, options: &ParseOptions) -> Accessor
where
    I: IntoIterator<Item = ParseEvent<'a>>,
{
    TreeBuilder::build(events, options).0
}

/// Render addressed elements as XML text
///
/// Fails with the held error when `accessor` is in its error state.
pub fn document(accessor: &Accessor, with_declaration: bool) -> Result<String> {
    Converter::new(accessor).make_document(with_declaration)
}
