//! Event handling for updown.
//!
//! This module turns terminal key presses into store actions.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
