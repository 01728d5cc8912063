//! # `OcaText`
//!
//! A pure-Rust library for reading, editing, and rebuilding the message
//! tables of The Legend of Zelda: Ocarina of Time.
//!
//! A message table comes as two files: an index table of 8-byte records, and
//! a flat blob of encoded messages. Messages are decoded into "shortcode"
//! text, where control codes appear as bracketed tags such as
//! `[color:red]` or `[break]`, and encoded back byte-for-byte.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocatext::formats::table::{TableConfig, read_table, write_table};
//!
//! let mut table = read_table("message_table.bin", "message_data.bin", TableConfig::default())?;
//! table.set_text(0x0001, "Hello, [name]![break]See you!")?;
//! write_table("message_table.bin", "message_data.bin", &table)?;
//! # Ok::<(), ocatext::Error>(())
//! ```
//!
//! ### Working with bytes
//!
//! ```
//! use ocatext::prelude::*;
//!
//! let (table, data) = build_files(&[MessageDescriptor::new(1, 0x07, "Hey\n[break]")])?;
//! let messages = parse_table(&table, &data)?;
//! assert_eq!(messages[0].text, "Hey\n[break]");
//! assert_eq!(to_display(&messages[0].text), "Hey\n\n[break]\n");
//! # Ok::<(), ocatext::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `ocatext` command-line binary

pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::message::{
        BoxPosition, BoxType, MessageDescriptor, decode_message, encode_message, from_display,
        to_display,
    };
    pub use crate::formats::table::{
        MessageTable, TableConfig, build_files, build_files_with, parse_table, parse_table_with,
        read_table, write_table,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
