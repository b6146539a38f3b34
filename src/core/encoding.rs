//! XML Encoding Detection and Conversion
//!
//! Handles detection of UTF-16 based on BOM or byte patterns.
//! Converts the input to a UTF-8 string for tokenizing.

use std::borrow::Cow;

/// Detected encoding of XML input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return XmlEncoding::Utf8;
        }

        match (input[0], input[1]) {
            // UTF-16 LE BOM: 0xFF 0xFE
            (0xFF, 0xFE) => XmlEncoding::Utf16Le,
            // UTF-16 BE BOM: 0xFE 0xFF
            (0xFE, 0xFF) => XmlEncoding::Utf16Be,
            // No BOM - check for UTF-16 pattern (< followed by null or null followed by <)
            (0x00, b'<') => XmlEncoding::Utf16Be,
            (b'<', 0x00) => XmlEncoding::Utf16Le,
            _ => XmlEncoding::Utf8,
        }
    }
}

/// Convert raw document bytes to a UTF-8 string
///
/// UTF-8 input (with or without BOM) is borrowed; UTF-16 input is decoded
/// into an owned string.
pub fn decode_to_utf8(input: &[u8]) -> Result<Cow<'_, str>, String> {
    match XmlEncoding::detect(input) {
        XmlEncoding::Utf8 => {
            let bytes = input.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(input);
            std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| format!("Invalid UTF-8: {}", e))
        }
        XmlEncoding::Utf16Le => {
            let bytes = input.strip_prefix(&[0xFF, 0xFE]).unwrap_or(input);
            decode_utf16(bytes, u16::from_le_bytes, "LE").map(Cow::Owned)
        }
        XmlEncoding::Utf16Be => {
            let bytes = input.strip_prefix(&[0xFE, 0xFF]).unwrap_or(input);
            decode_utf16(bytes, u16::from_be_bytes, "BE").map(Cow::Owned)
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16, order: &str) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!("Invalid UTF-16 {}: odd number of bytes", order));
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units).map_err(|e| format!("Invalid UTF-16 {}: {}", order, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(XmlEncoding::detect(b"<root/>"), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(&[0xEF, 0xBB, 0xBF, b'<']), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(&[0xFF, 0xFE, b'<', 0x00]), XmlEncoding::Utf16Le);
        assert_eq!(XmlEncoding::detect(&[0xFE, 0xFF, 0x00, b'<']), XmlEncoding::Utf16Be);
        assert_eq!(XmlEncoding::detect(&[b'<', 0x00]), XmlEncoding::Utf16Le);
    }

    #[test]
    fn test_utf8_passthrough() {
        let result = decode_to_utf8(b"<root>hello</root>").unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "<root>hello</root>");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let result = decode_to_utf8(&[0xEF, 0xBB, 0xBF, b'<', b'r', b'/', b'>']).unwrap();
        assert_eq!(result, "<r/>");
    }

    #[test]
    fn test_convert_utf16() {
        let le = [0xFF, 0xFE, b'<', 0x00, b'r', 0x00, b'/', 0x00, b'>', 0x00];
        assert_eq!(decode_to_utf8(&le).unwrap(), "<r/>");

        let be = [0xFE, 0xFF, 0x00, b'<', 0x00, b'r', 0x00, b'/', 0x00, b'>'];
        assert_eq!(decode_to_utf8(&be).unwrap(), "<r/>");
    }

    #[test]
    fn test_invalid_input() {
        assert!(decode_to_utf8(&[b'<', 0xC3, 0x28]).is_err());
        assert!(decode_to_utf8(&[0xFF, 0xFE, b'<']).is_err());
    }
}
