//! XML Reader Module
//!
//! Produces the ordered event stream the tree builder consumes:
//! - SliceReader: pull reader over an in-memory document
//! - Events: parse event types
//! - Handler: callback trait and dispatch loop

pub mod events;
pub mod handler;
pub mod slice;

pub use events::ParseEvent;
pub use handler::{dispatch, EventHandler};
pub use slice::SliceReader;
