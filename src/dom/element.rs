//! XML Element
//!
//! A mutable tree node shared by handle. Children are owned by their parent's
//! child list; the parent link is weak, so dropping the document root frees
//! the whole tree.

use crate::options::Trimming;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Reserved name of the synthetic element that holds the document's root
/// element. It never appears in rendered output.
pub const DOCUMENT_ROOT_NAME: &str = "#document-root";

/// Attribute map of an element
pub type Attributes = BTreeMap<String, String>;

#[derive(Default)]
struct ElementData {
    name: String,
    attributes: Attributes,
    text: Option<String>,
    cdata: Option<Vec<u8>>,
    children: Vec<Element>,
    parent: Weak<RefCell<ElementData>>,
    ignore_namespaces: bool,
    line_start: Option<usize>,
    line_end: Option<usize>,
}

impl Drop for ElementData {
    // Unlinks descendants through a work list so deep trees do not recurse
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(child.0) {
                pending.append(&mut cell.into_inner().children);
            }
        }
    }
}

/// Handle to an element in a document tree
///
/// Cloning the handle does not copy the element; all clones observe the same
/// node. Equality is node identity.
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

impl Element {
    /// Create a detached element with the given tag name
    pub fn new(name: impl Into<String>) -> Self {
        let mut data = ElementData::default();
        data.name = name.into();
        Element(Rc::new(RefCell::new(data)))
    }

    /// Create the synthetic document root
    pub fn document_root(ignore_namespaces: bool) -> Self {
        let root = Element::new(DOCUMENT_ROOT_NAME);
        root.0.borrow_mut().ignore_namespaces = ignore_namespaces;
        root
    }

    /// Builder-style: set the text
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Builder-style: add one attribute
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.borrow_mut().attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style: append a child
    pub fn with_child(self, child: Element) -> Self {
        self.append_child(&child);
        self
    }

    /// Tag name, possibly with a namespace prefix
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Tag name without its namespace prefix
    pub fn local_name(&self) -> String {
        let data = self.0.borrow();
        local_part(&data.name).to_string()
    }

    /// Whether this is the synthetic document root
    pub fn is_document_root(&self) -> bool {
        self.0.borrow().name == DOCUMENT_ROOT_NAME
    }

    /// Whether `key` selects this element in a name lookup
    ///
    /// With namespaces ignored only the part after the last `:` of this
    /// element's name is compared.
    pub fn matches_name(&self, key: &str) -> bool {
        let data = self.0.borrow();
        if data.ignore_namespaces {
            local_part(&data.name) == key
        } else {
            data.name == key
        }
    }

    pub fn ignores_namespaces(&self) -> bool {
        self.0.borrow().ignore_namespaces
    }

    pub fn set_ignore_namespaces(&self, ignore: bool) {
        self.0.borrow_mut().ignore_namespaces = ignore;
    }

    /// Character data directly inside this element
    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = Some(text.into());
    }

    pub fn clear_text(&self) {
        self.0.borrow_mut().text = None;
    }

    /// Append character data, starting from empty text on first use
    pub fn push_text(&self, text: &str) {
        self.0
            .borrow_mut()
            .text
            .get_or_insert_with(String::new)
            .push_str(text);
    }

    /// Trim both ends of the text with the given character set
    pub fn trim_text(&self, trimming: &Trimming) {
        let mut data = self.0.borrow_mut();
        if let Some(text) = data.text.as_mut() {
            let trimmed = trimming.trim(text);
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
    }

    pub fn attributes(&self) -> Attributes {
        self.0.borrow().attributes.clone()
    }

    /// Value of one attribute
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn set_attributes(&self, attributes: Attributes) {
        self.0.borrow_mut().attributes = attributes;
    }

    /// Raw CDATA payload
    pub fn cdata(&self) -> Option<Vec<u8>> {
        self.0.borrow().cdata.clone()
    }

    pub fn set_cdata(&self, cdata: impl Into<Vec<u8>>) {
        self.0.borrow_mut().cdata = Some(cdata.into());
    }

    /// Child elements in document order
    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Children selected by a name lookup for `key`
    pub fn children_named(&self, key: &str) -> Vec<Element> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| child.matches_name(key))
            .cloned()
            .collect()
    }

    /// Parent element, if attached
    pub fn parent(&self) -> Option<Element> {
        self.0.borrow().parent.upgrade().map(Element)
    }

    /// Append `child` to this element's children and point its parent here
    ///
    /// The child is not removed from a previous parent's list.
    pub fn append_child(&self, child: &Element) {
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Source line of the start tag
    pub fn line_start(&self) -> Option<usize> {
        self.0.borrow().line_start
    }

    /// Source line of the end tag
    pub fn line_end(&self) -> Option<usize> {
        self.0.borrow().line_end
    }

    pub(crate) fn set_line_start(&self, line: Option<usize>) {
        self.0.borrow_mut().line_start = line;
    }

    pub(crate) fn set_line_end(&self, line: Option<usize>) {
        self.0.borrow_mut().line_end = line;
    }

    /// Names from the outermost ancestor down to this element, joined by ` > `
    pub fn ancestry(&self) -> String {
        let mut names = vec![self.name()];
        let mut current = self.parent();
        while let Some(element) = current {
            names.push(element.name());
            current = element.parent();
        }
        names.reverse();
        names.join(" > ")
    }
}

fn local_part(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Element")
            .field("name", &data.name)
            .field("attributes", &data.attributes)
            .field("text", &data.text)
            .field("children", &data.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_helpers() {
        let element = Element::new("item")
            .with_text("hello")
            .with_attribute("id", "1")
            .with_child(Element::new("sub"));

        assert_eq!(element.name(), "item");
        assert_eq!(element.text().as_deref(), Some("hello"));
        assert_eq!(element.attribute("id").as_deref(), Some("1"));
        assert_eq!(element.child_count(), 1);
        assert_eq!(element.children()[0].parent(), Some(element.clone()));
    }

    #[test]
    fn test_identity_equality() {
        let a = Element::new("a");
        let b = Element::new("a");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_push_text() {
        let element = Element::new("a");
        assert_eq!(element.text(), None);
        element.push_text("");
        assert_eq!(element.text().as_deref(), Some(""));
        element.push_text("x");
        element.push_text("y");
        assert_eq!(element.text().as_deref(), Some("xy"));
        element.clear_text();
        assert_eq!(element.text(), None);
    }

    #[test]
    fn test_trim_text() {
        let element = Element::new("a").with_text("\n  value \n");
        element.trim_text(&Trimming::WhitespaceAndNewlines);
        assert_eq!(element.text().as_deref(), Some("value"));
    }

    #[test]
    fn test_name_matching() {
        let element = Element::new("ns1:Child");
        assert!(element.matches_name("ns1:Child"));
        assert!(!element.matches_name("Child"));
        assert_eq!(element.local_name(), "Child");

        element.set_ignore_namespaces(true);
        assert!(element.matches_name("Child"));
        assert!(!element.matches_name("ns1:Child"));
    }

    #[test]
    fn test_children_named() {
        let parent = Element::new("p")
            .with_child(Element::new("a").with_text("1"))
            .with_child(Element::new("b"))
            .with_child(Element::new("a").with_text("2"));
        let found = parent.children_named("a");
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].text().as_deref(), Some("2"));
    }

    #[test]
    fn test_ancestry() {
        let leaf = Element::new("c");
        let _root = Element::document_root(false)
            .with_child(Element::new("a").with_child(Element::new("b").with_child(leaf.clone())));
        assert_eq!(leaf.ancestry(), "#document-root > a > b > c");
    }

    #[test]
    fn test_drop_deep_chain() {
        let root = Element::document_root(false);
        let mut tail = root.clone();
        for _ in 0..200_000 {
            let child = Element::new("a");
            tail.append_child(&child);
            tail = child;
        }
        assert_eq!(tail.ancestry().matches(" > ").count(), 200_000);
        drop(tail);
        drop(root);
    }

    #[test]
    fn test_drop_keeps_shared_children() {
        let kept = Element::new("b").with_child(Element::new("c"));
        drop(Element::new("a").with_child(kept.clone()));
        assert_eq!(kept.child_count(), 1);
        assert_eq!(kept.parent(), None);
    }

    #[test]
    fn test_document_root() {
        let root = Element::document_root(true);
        assert!(root.is_document_root());
        assert!(root.ignores_namespaces());
        assert!(!Element::new("a").is_document_root());
    }
}
