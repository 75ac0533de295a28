//! # Glk Events
//!
//! Normalization layer between a Glk interpreter and whatever draws it. Each
//! call turns one GlkOte/RemGlk update document into an ordered list of
//! strongly-typed UI events, built on the wire model in `glk_protocol`.
//!
//! ## Core Components
//!
//! - **parser**: Top-level dispatch of an update document into UI events
//! - **normalizer**: Collapses buffer paragraphs, grid lines and draw lists into span events
//! - **resolver**: The injected image-id -> URL lookup
//! - **events**: The UI event types handed to the renderer
//! - **config**: Parser options, loadable from TOML
//!
//! ## Design Philosophy
//!
//! - **Pure**: Parsing performs no I/O and keeps no state between calls
//! - **Order-Preserving**: Events come out in document order, never reordered or deduplicated
//! - **Total**: Malformed pieces degrade to less output, never to a failed document

pub mod config;
pub mod error;
pub mod events;
pub mod normalizer;
pub mod parser;
pub mod resolver;

pub use config::*;
pub use error::*;
pub use events::*;
pub use normalizer::*;
pub use parser::*;
pub use resolver::*;
