//! XML Entity Decoding and Text Escaping
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode text content, handling entity references
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded. Unknown named entities are kept
/// verbatim; a bare `&` or an invalid character reference is an error.
pub fn decode_text(input: &str) -> Result<Cow<'_, str>, &'static str> {
    if memchr(b'&', input.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(input));
    }
    decode_entities(input).map(Cow::Owned)
}

/// Decode character data after folding its line ends
pub fn decode_content(input: &str) -> Result<Cow<'_, str>, &'static str> {
    match normalize_line_ends(input) {
        Cow::Borrowed(raw) => decode_text(raw),
        Cow::Owned(raw) => decode_text(&raw).map(|text| Cow::Owned(text.into_owned())),
    }
}

/// Decode an attribute value
///
/// Literal tabs and line ends become spaces before entities are expanded,
/// so `&#10;` still yields a newline.
pub fn decode_attribute_value(input: &str) -> Result<Cow<'_, str>, &'static str> {
    if !input.bytes().any(|b| matches!(b, b'\t' | b'\n' | b'\r')) {
        return decode_text(input);
    }
    let spaced: String = normalize_line_ends(input)
        .chars()
        .map(|c| if matches!(c, '\t' | '\n') { ' ' } else { c })
        .collect();
    decode_text(&spaced).map(|value| Cow::Owned(value.into_owned()))
}

/// Fold `\r\n` and lone `\r` into `\n`
pub fn normalize_line_ends(input: &str) -> Cow<'_, str> {
    if memchr(b'\r', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            chars.next_if_eq(&'\n');
            result.push('\n');
        } else {
            result.push(c);
        }
    }
    Cow::Owned(result)
}

fn decode_entities(input: &str) -> Result<String, &'static str> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        result.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let semi = memchr(b';', rest.as_bytes()).ok_or("Bare '&' not allowed in content")?;
        let entity = &rest[1..semi];
        if !is_entity_reference(entity) {
            return Err("Bare '&' not allowed in content");
        }

        match decode_entity(entity)? {
            Some(c) => result.push(c),
            // Unknown entity, keep as-is (for user-defined entities)
            None => result.push_str(&rest[..=semi]),
        }
        rest = &rest[semi + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

/// Check that the text between `&` and `;` looks like a reference at all
fn is_entity_reference(entity: &str) -> bool {
    let bytes = entity.as_bytes();
    match bytes.first() {
        Some(b'#') => bytes.len() > 1,
        Some(&b) => {
            super::scanner::is_name_start_char(b)
                && bytes[1..].iter().all(|&b| super::scanner::is_name_char(b))
        }
        None => false,
    }
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &str) -> Result<Option<char>, &'static str> {
    if let Some(numeric) = entity.strip_prefix('#') {
        return decode_numeric_entity(numeric)
            .map(Some)
            .ok_or("Invalid character reference");
    }

    Ok(match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    })
}

/// Decode a numeric character reference, validating it is an XML Char
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let codepoint = match entity.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => entity.parse::<u32>().ok()?,
    };

    if !is_valid_xml_char(codepoint) {
        return None;
    }
    char::from_u32(codepoint)
}

/// Check if a code point is a valid XML 1.0 Char
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}

/// Validate content for characters not allowed in XML 1.0
pub fn validate_xml_content(content: &str) -> Result<(), &'static str> {
    // Fast path: printable ASCII and the three allowed controls
    if content
        .bytes()
        .all(|b| matches!(b, 0x9 | 0xA | 0xD | 0x20..=0x7E))
    {
        return Ok(());
    }

    for c in content.chars() {
        if !is_valid_xml_char(c as u32) {
            return Err(if (c as u32) < 0x20 {
                "Invalid XML character: control character not allowed"
            } else {
                "Invalid XML character"
            });
        }
    }
    Ok(())
}

/// Escape element text for XML output
///
/// Only `&`, `<` and `>` are escaped. Each character is replaced once, so
/// an existing `&lt;` in the text becomes `&amp;lt;` and decodes back to
/// the same text.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(|b| matches!(b, b'<' | b'>' | b'&')) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        let result = decode_text("Hello, World!").unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_basic_entities() {
        let result = decode_text("&lt;hello&gt; &amp; &quot;world&quot; &apos;").unwrap();
        assert_eq!(result, "<hello> & \"world\" '");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_text("&#65;&#66;&#67;").unwrap(), "ABC");
        assert_eq!(decode_text("&#x41;&#X42;&#x43;").unwrap(), "ABC");
        assert_eq!(decode_text("&#x1F600;").unwrap(), "😀");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(decode_text("a &unknown; b").unwrap(), "a &unknown; b");
    }

    #[test]
    fn test_bare_ampersand() {
        assert!(decode_text("fish & chips").is_err());
        assert!(decode_text("trailing &").is_err());
        assert!(decode_text("&;").is_err());
    }

    #[test]
    fn test_invalid_char_reference() {
        assert!(decode_text("&#0;").is_err());
        assert!(decode_text("&#x1c;").is_err());
        assert!(decode_text("&#xZZ;").is_err());
    }

    #[test]
    fn test_validate_content() {
        assert!(validate_xml_content("plain\ttext\r\n").is_ok());
        assert!(validate_xml_content("@ß123").is_ok());
        assert!(validate_xml_content("@ß123\u{1c}").is_err());
        assert!(validate_xml_content("\u{FFFE}").is_err());
    }

    #[test]
    fn test_escape_text() {
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_text("a < b > c & d"), "a &lt; b &gt; c &amp; d");
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
    }

    #[test]
    fn test_line_ends_folded() {
        assert!(matches!(normalize_line_ends("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_line_ends("a\r\nb\rc\r\r\nd\r"), "a\nb\nc\n\nd\n");
        assert_eq!(decode_content("x\r\n&lt;y").unwrap(), "x\n<y");
    }

    #[test]
    fn test_attribute_value_whitespace() {
        assert_eq!(decode_attribute_value("x\ny").unwrap(), "x y");
        assert_eq!(decode_attribute_value("a\tb\r\nc").unwrap(), "a b c");
        assert_eq!(decode_attribute_value("keep&#10;&#9;it").unwrap(), "keep\n\tit");
        assert!(decode_attribute_value("bad\n&").is_err());
    }
}
