//! Event Handler Trait
//!
//! Implement this trait to receive parse events one at a time. `dispatch`
//! feeds any ordered event sequence to a handler and stops after the first
//! terminal error, so handlers never see events that follow one.

use super::events::ParseEvent;
use crate::core::attributes::Attribute;
use crate::core::tokenizer::ParseError;

/// Trait for handling parse events
pub trait EventHandler {
    /// Called when an element starts
    fn element_start(&mut self, name: &str, attributes: &[Attribute<'_>], line: Option<usize>);

    /// Called for character data inside the current element
    fn character_data(&mut self, text: &str);

    /// Called for a CDATA section inside the current element
    fn cdata(&mut self, bytes: &[u8]);

    /// Called when an element ends
    fn element_end(&mut self, name: &str, line: Option<usize>);

    /// Called once if the document could not be read
    fn parse_error(&mut self, error: ParseError);
}

/// Feed `events` to `handler` in order
///
/// Returns the number of events delivered, including a terminal error.
pub fn dispatch<'a, I, H>(events: I, handler: &mut H) -> usize
where
    I: IntoIterator<Item = ParseEvent<'a>>,
    H: EventHandler + ?Sized,
{
    let mut delivered = 0;
    for event in events {
        delivered += 1;
        match event {
            ParseEvent::ElementStart { name, attributes, line } => {
                handler.element_start(&name, &attributes, line)
            }
            ParseEvent::CharacterData(text) => handler.character_data(&text),
            ParseEvent::CData(bytes) => handler.cdata(&bytes),
            ParseEvent::ElementEnd { name, line } => handler.element_end(&name, line),
            ParseEvent::ParseError(error) => {
                handler.parse_error(error);
                break;
            }
        }
    }
    delivered
}
