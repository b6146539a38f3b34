//! DOM Module - shared element tree
//!
//! - Element: mutable node handle with a weak parent link
//! - TreeBuilder: event handler assembling elements under a document root

pub mod builder;
pub mod element;

pub use builder::TreeBuilder;
pub use element::{Attributes, Element, DOCUMENT_ROOT_NAME};
