//! Interactive mode module.
//!
//! Terminal detection and the migration order prompt.

pub mod prompts;

pub use prompts::*;
