//! Message index table format
//!
//! The table is a flat run of 8-byte big-endian records, one per message:
//!
//! | bytes | field                         |
//! |-------|-------------------------------|
//! | 0–1   | message id                    |
//! | 2     | `box_type << 4 \| position`   |
//! | 3     | reserved (0)                  |
//! | 4     | bank                          |
//! | 5–7   | offset into message data (24-bit) |
//!
//! A language section ends with an `0xfffd` record whose offset is the total
//! message data length, followed by a terminal `0xffff` record. A message's
//! length is the distance to the next record's offset.

mod editor;
mod reader;
mod translation;
mod writer;

pub use editor::SearchMatch;
pub use reader::{parse_table, parse_table_with, read_table};
pub use translation::{ImportResult, export_for_translation, import_translations};
pub use writer::{build_files, build_files_with, write_table};

use crate::error::Result;
use crate::formats::message::MessageDescriptor;

/// Size of each table record
pub const RECORD_SIZE: usize = 8;

/// Id of the end-of-data sentinel record
pub const SENTINEL_ID: u16 = 0xfffd;

/// Id of the record that terminates the table
pub const TERMINAL_ID: u16 = 0xffff;

/// Bank value of the English section
pub const BANK_ENGLISH: u8 = 0x07;

/// Largest offset representable in a record
pub const MAX_OFFSET: u32 = 0x00ff_ffff;

/// Table layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Language section to read, and the bank written into the sentinel
    pub bank: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { bank: BANK_ENGLISH }
    }
}

/// A loaded message table: descriptors in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    pub messages: Vec<MessageDescriptor>,
    pub config: TableConfig,
}

impl MessageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table and its message data
    pub fn from_bytes(table: &[u8], data: &[u8], config: TableConfig) -> Result<Self> {
        Ok(Self {
            messages: parse_table_with(table, data, &config)?,
            config,
        })
    }

    /// Serialize into `(table_bytes, message_bytes)`
    pub fn to_bytes(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        build_files_with(&self.messages, &self.config)
    }

    /// Serialize the descriptors as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }

    /// Load descriptors from JSON produced by [`MessageTable::to_json`]
    pub fn from_json(json: &str, config: TableConfig) -> Result<Self> {
        Ok(Self {
            messages: serde_json::from_str(json)?,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::message::{BoxPosition, BoxType};

    #[test]
    fn test_json_round_trip() {
        let mut message = MessageDescriptor::new(0x0102, BANK_ENGLISH, "[color:red]Hi");
        message.box_type = BoxType::Unknown(9);
        message.position = BoxPosition::Bottom;
        let table = MessageTable {
            messages: vec![message],
            config: TableConfig::default(),
        };

        let json = table.to_json().unwrap();
        assert!(json.contains("\"position\": \"bottom\""));
        assert_eq!(MessageTable::from_json(&json, TableConfig::default()).unwrap(), table);
    }

    #[test]
    fn test_bytes_round_trip() {
        let table = MessageTable {
            messages: vec![
                MessageDescriptor::new(1, BANK_ENGLISH, "a"),
                MessageDescriptor::new(2, BANK_ENGLISH, "bcdef"),
            ],
            config: TableConfig::default(),
        };
        let (table_bytes, data) = table.to_bytes().unwrap();
        let parsed = MessageTable::from_bytes(&table_bytes, &data, table.config).unwrap();
        assert_eq!(parsed.messages[1].offset, 4);
        assert_eq!(parsed.to_bytes().unwrap(), (table_bytes, data));
    }
}
