//! Core XML parsing primitives
//!
//! This module contains the fundamental building blocks for XML parsing:
//! - Scanner: SIMD-accelerated delimiter detection and line tracking using memchr
//! - Tokenizer: State machine for XML token extraction
//! - Entities: XML entity decoding with Cow (zero-copy when possible) and text escaping
//! - Attributes: Attribute parsing and extraction
//! - Encoding: UTF-16 detection and conversion to UTF-8

pub mod attributes;
pub mod encoding;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
