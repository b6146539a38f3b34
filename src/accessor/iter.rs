//! Iteration over addressed elements

use super::Accessor;
use crate::dom::Element;
use std::iter::FusedIterator;

/// Iterator yielding one `Single` accessor per addressed element
#[derive(Debug, Clone)]
pub struct Iter {
    elements: std::vec::IntoIter<Element>,
}

impl Iter {
    pub(super) fn new(elements: Vec<Element>) -> Self {
        Iter {
            elements: elements.into_iter(),
        }
    }
}

impl Iterator for Iter {
    type Item = Accessor;

    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next().map(Accessor::Single)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl DoubleEndedIterator for Iter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.elements.next_back().map(Accessor::Single)
    }
}

impl ExactSizeIterator for Iter {}

impl FusedIterator for Iter {}

impl IntoIterator for Accessor {
    type Item = Accessor;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter::new(self.all().unwrap_or_default())
    }
}

impl IntoIterator for &Accessor {
    type Item = Accessor;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}
