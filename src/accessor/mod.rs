//! Accessor - tri-state navigation over an element tree
//!
//! Every lookup returns a new accessor in one of three states:
//! - `Single`: exactly one element resolved
//! - `Many`: zero or more sibling elements resolved as a set
//! - `Error`: the path failed; the error is carried along unchanged
//!
//! Errors are absorbing, so long chains need no checks between steps:
//!
//! ```
//! let xml = xmlnav::parse("<Root><A>1</A><A>2</A></Root>");
//! assert_eq!(xml.key("Root").key("A").at(0).int(), Some(1));
//! assert!(xml.key("Nope").key("A").at(0).error().is_some());
//! ```

pub mod iter;
pub mod path;

pub use iter::Iter;
pub use path::PathStep;

use crate::dom::{Attributes, Element};
use crate::error::{Result, XmlError};
use std::fmt;
use url::Url;

/// Result of navigating an element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    Single(Element),
    Many(Vec<Element>),
    Error(XmlError),
}

impl From<Element> for Accessor {
    fn from(element: Element) -> Self {
        Accessor::Single(element)
    }
}

impl From<Vec<Element>> for Accessor {
    fn from(elements: Vec<Element>) -> Self {
        Accessor::Many(elements)
    }
}

impl From<XmlError> for Accessor {
    fn from(error: XmlError) -> Self {
        Accessor::Error(error)
    }
}

impl Accessor {
    /// Index step
    ///
    /// A lone element behaves as a one-element sequence, so index 0 of a
    /// `Single` is the same element.
    pub fn at(&self, index: usize) -> Accessor {
        match self {
            Accessor::Many(elements) if index < elements.len() => {
                Accessor::Single(elements[index].clone())
            }
            Accessor::Single(element) if index == 0 => Accessor::Single(element.clone()),
            Accessor::Error(error) => Accessor::Error(error.clone()),
            _ => Accessor::Error(XmlError::access(format!("cannot access Index: {}", index))),
        }
    }

    /// Name step: the children of a single element with tag name `key`
    ///
    /// Defined only when exactly one parent is in scope; on `Many` it
    /// always fails, even if indexing first would have succeeded.
    pub fn key(&self, key: &str) -> Accessor {
        match self {
            Accessor::Single(element) => {
                let mut matches = element.children_named(key);
                match matches.len() {
                    0 => Accessor::Error(XmlError::access(format!("{} not found.", key))),
                    1 => Accessor::Single(matches.remove(0)),
                    _ => Accessor::Many(matches),
                }
            }
            Accessor::Many(_) => Accessor::Error(XmlError::access(format!(
                "cannot access {}, because of multiple elements",
                key
            ))),
            Accessor::Error(error) => Accessor::Error(error.clone()),
        }
    }

    /// A single step of either kind
    pub fn get(&self, step: impl Into<PathStep>) -> Accessor {
        match step.into() {
            PathStep::Index(index) => self.at(index),
            PathStep::Key(key) => self.key(&key),
        }
    }

    /// Apply steps in order; the first failure is the result
    pub fn path<I>(&self, steps: I) -> Accessor
    where
        I: IntoIterator,
        I::Item: Into<PathStep>,
    {
        let mut accessor = self.clone();
        for step in steps {
            if accessor.is_error() {
                break;
            }
            accessor = accessor.get(step);
        }
        accessor
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Accessor::Error(_))
    }

    /// Tag name of a single element
    pub fn name(&self) -> Option<String> {
        match self {
            Accessor::Single(element) => Some(element.name()),
            _ => None,
        }
    }

    /// Text of a single element
    pub fn text(&self) -> Option<String> {
        match self {
            Accessor::Single(element) => element.text(),
            _ => None,
        }
    }

    /// Replace the text of a single element; no-op otherwise
    pub fn set_text(&self, text: impl Into<String>) {
        if let Accessor::Single(element) = self {
            element.set_text(text);
        }
    }

    /// Whether the text reads `true`
    pub fn bool(&self) -> Option<bool> {
        self.text().map(|text| text == "true")
    }

    pub fn int(&self) -> Option<i64> {
        self.text().and_then(|text| text.parse().ok())
    }

    pub fn double(&self) -> Option<f64> {
        self.text().and_then(|text| text.parse().ok())
    }

    /// The text parsed as an absolute URL
    pub fn url(&self) -> Option<Url> {
        self.text().and_then(|text| Url::parse(&text).ok())
    }

    /// Attributes of a single element; empty otherwise
    pub fn attributes(&self) -> Attributes {
        match self {
            Accessor::Single(element) => element.attributes(),
            _ => Attributes::new(),
        }
    }

    /// Replace the attributes of a single element; no-op otherwise
    pub fn set_attributes(&self, attributes: Attributes) {
        if let Accessor::Single(element) = self {
            element.set_attributes(attributes);
        }
    }

    /// Every addressed element
    pub fn all(&self) -> Option<Vec<Element>> {
        match self {
            Accessor::Single(element) => Some(vec![element.clone()]),
            Accessor::Many(elements) => Some(elements.clone()),
            Accessor::Error(_) => None,
        }
    }

    /// Tag names of every addressed element
    pub fn names(&self) -> Option<Vec<String>> {
        match self {
            Accessor::Single(element) => Some(vec![element.name()]),
            Accessor::Many(elements) => Some(elements.iter().map(Element::name).collect()),
            Accessor::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&XmlError> {
        match self {
            Accessor::Error(error) => Some(error),
            _ => None,
        }
    }

    /// The element of a `Single`; `Many` of one element does not count
    pub fn element(&self) -> Option<Element> {
        match self {
            Accessor::Single(element) => Some(element.clone()),
            _ => None,
        }
    }

    pub fn first(&self) -> Accessor {
        match self {
            Accessor::Single(element) => Accessor::Single(element.clone()),
            Accessor::Many(elements) => match elements.first() {
                Some(element) => Accessor::Single(element.clone()),
                None => Accessor::Error(XmlError::access("cannot access first element")),
            },
            Accessor::Error(error) => Accessor::Error(error.clone()),
        }
    }

    pub fn last(&self) -> Accessor {
        match self {
            Accessor::Single(element) => Accessor::Single(element.clone()),
            Accessor::Many(elements) => match elements.last() {
                Some(element) => Accessor::Single(element.clone()),
                None => Accessor::Error(XmlError::access("cannot access last element")),
            },
            Accessor::Error(error) => Accessor::Error(error.clone()),
        }
    }

    /// Apply `transform` to each addressed element as a `Single`
    pub fn map<T, F>(&self, transform: F) -> Vec<T>
    where
        F: FnMut(Accessor) -> T,
    {
        self.iter().map(transform).collect()
    }

    /// Like `map`, dropping `None` results
    pub fn filter_map<T, F>(&self, transform: F) -> Vec<T>
    where
        F: FnMut(Accessor) -> Option<T>,
    {
        self.iter().filter_map(transform).collect()
    }

    /// Append `element` as the last child of a single element; no-op otherwise
    pub fn append(&self, element: Element) {
        if let Accessor::Single(parent) = self {
            parent.append_child(&element);
        }
    }

    pub fn iter(&self) -> Iter {
        Iter::new(self.all().unwrap_or_default())
    }

    /// `Err` with the held error, or this accessor
    pub fn into_result(self) -> Result<Accessor> {
        match self {
            Accessor::Error(error) => Err(error),
            accessor => Ok(accessor),
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Single(element) => write!(f, "\"{}\"", element.ancestry()),
            Accessor::Many(elements) => {
                let chains: Vec<String> = elements.iter().map(Element::ancestry).collect();
                write!(f, "[ {} ]", chains.join(",\n "))
            }
            Accessor::Error(error) => write!(f, "{}", error),
        }
    }
}
