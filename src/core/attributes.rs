//! XML Attribute Parsing
//!
//! Parses XML attributes from tag content.

use super::entities::{decode_attribute_value, validate_xml_content};
use super::scanner::{is_name_char, is_name_start_char};
use std::borrow::Cow;

/// A parsed XML attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name (may include namespace prefix)
    pub name: Cow<'a, str>,
    /// Attribute value (entities decoded)
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    /// Create a new attribute
    pub fn new(name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input should be the content between element name and '>' or '/>'.
/// Names must be well-formed, values must be quoted, must not contain `<`,
/// and must not repeat an attribute name already seen on the same tag.
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute<'_>>, &'static str> {
    let bytes = input.as_bytes();
    let mut attrs: Vec<Attribute<'_>> = Vec::new();
    let mut pos = 0;

    loop {
        let ws_start = pos;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        if pos >= bytes.len() {
            break;
        }

        // Attributes must be separated from the tag name and from each other
        if pos == ws_start {
            return Err("Whitespace required between attributes");
        }

        // Parse attribute name
        let name_start = pos;
        if !is_name_start_char(bytes[pos]) {
            return Err("Attribute name must start with letter, underscore, or colon");
        }
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        // Skip whitespace around '='
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'=' {
            return Err("Attribute value required");
        }
        pos += 1;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        // Parse attribute value
        let quote = match bytes.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => return Err("Attribute value must be quoted"),
        };
        pos += 1;
        let value_start = pos;
        while pos < bytes.len() && bytes[pos] != quote {
            if bytes[pos] == b'<' {
                return Err("Attribute value cannot contain '<'");
            }
            pos += 1;
        }
        if pos >= bytes.len() {
            return Err("Attribute value has mismatched quotes");
        }

        let raw = &input[value_start..pos];
        validate_xml_content(raw)?;
        let value = decode_attribute_value(raw)?;
        pos += 1; // Skip closing quote

        if attrs.iter().any(|a| a.name == name) {
            return Err("Duplicate attribute");
        }
        attrs.push(Attribute::new(name, value));
    }

    Ok(attrs)
}

/// Check if byte is whitespace
#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_attributes() {
        let attrs = parse_attributes(" id=\"test\" class=\"foo\"").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "id");
        assert_eq!(attrs[0].value, "test");
        assert_eq!(attrs[1].name, "class");
        assert_eq!(attrs[1].value, "foo");
    }

    #[test]
    fn test_single_quoted() {
        let attrs = parse_attributes(" id='te\"st'").unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].value, "te\"st");
    }

    #[test]
    fn test_namespaced_attribute() {
        let attrs = parse_attributes(" xmlns:xlink=\"http://www.w3.org/1999/xlink\"").unwrap();
        assert_eq!(attrs[0].name, "xmlns:xlink");
    }

    #[test]
    fn test_entity_in_value() {
        let attrs = parse_attributes(" title=\"&lt;hello&gt;\"").unwrap();
        assert_eq!(attrs[0].value, "<hello>");
    }

    #[test]
    fn test_value_whitespace_normalized() {
        let attrs = parse_attributes(" a=\"x\ny\" b='\tz\r\n' c=\"l&#10;m\"").unwrap();
        assert_eq!(attrs[0].value, "x y");
        assert_eq!(attrs[1].value, " z ");
        assert_eq!(attrs[2].value, "l\nm");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(parse_attributes("").unwrap().is_empty());
        assert!(parse_attributes("  \n").unwrap().is_empty());

        let attrs = parse_attributes("  id  =  \"test\"  ").unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].name, "id");
        assert_eq!(attrs[0].value, "test");
    }

    #[test]
    fn test_malformed() {
        assert!(parse_attributes(" id=test").is_err());
        assert!(parse_attributes(" checked").is_err());
        assert!(parse_attributes(" a=\"x\"b=\"y\"").is_err());
        assert!(parse_attributes(" a=\"<\"").is_err());
        assert!(parse_attributes(" a=\"x").is_err());
        assert!(parse_attributes(" 1a=\"x\"").is_err());
        assert!(parse_attributes(" a=\"x\" a=\"y\"").is_err());
        assert!(parse_attributes(" a=\"fish & chips\"").is_err());
    }
}
