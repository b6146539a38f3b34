//! Path steps for multi-step navigation

use std::fmt;

/// One step of a path: a child index or a child tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Index(usize),
    Key(String),
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<&String> for PathStep {
    fn from(key: &String) -> Self {
        PathStep::Key(key.clone())
    }
}

impl From<&PathStep> for PathStep {
    fn from(step: &PathStep) -> Self {
        step.clone()
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Index(index) => write!(f, "{}", index),
            PathStep::Key(key) => f.write_str(key),
        }
    }
}

/// Build a path from mixed index and name steps
///
/// ```
/// use xmlnav::{parse, path};
///
/// let xml = parse("<Root><A>1</A><A>2</A></Root>");
/// assert_eq!(xml.path(path!["Root", "A", 1]).text().as_deref(), Some("2"));
/// ```
#[macro_export]
macro_rules! path {
    ($($step:expr),* $(,)?) => {
        [$($crate::PathStep::from($step)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(PathStep::from(3), PathStep::Index(3));
        assert_eq!(PathStep::from("a"), PathStep::Key("a".to_string()));
        assert_eq!(PathStep::from(String::from("b")), PathStep::Key("b".to_string()));
    }

    #[test]
    fn test_macro() {
        let steps = path!["Root", 0, "Child"];
        assert_eq!(
            steps,
            [
                PathStep::Key("Root".to_string()),
                PathStep::Index(0),
                PathStep::Key("Child".to_string()),
            ]
        );
        assert_eq!(steps[1].to_string(), "0");
    }
}
