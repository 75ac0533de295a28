//! # Glk Protocol
//!
//! Wire model of the GlkOte/RemGlk JSON protocol. An interpreter emits one
//! update document per generation; the client answers with input events.
//! This crate is the single source of truth for the field names on the wire
//! and does not decide how any of it is presented.
//!
//! ## Modules
//!
//! - **update**: The interpreter -> client update document, window layout and input requests
//! - **content**: Per-window content blocks (buffer paragraphs, grid lines, draw operations) and spans
//! - **input**: The client -> interpreter input events and display metrics

#[macro_use]
mod wire_name;

pub mod content;
pub mod error;
pub mod input;
mod lenient;
pub mod update;

pub use content::*;
pub use error::*;
pub use input::*;
pub use update::*;
