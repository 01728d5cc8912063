//! Error types for `OcaText`

use thiserror::Error;

/// The error type for `OcaText` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Table Format Errors ====================
    /// The index table is truncated, has no matching language section,
    /// lacks the end-of-data sentinel, or has decreasing offsets.
    #[error("malformed message table: {reason}")]
    MalformedTable {
        /// Description of what is malformed.
        reason: String,
    },

    // ==================== Message Codec Errors ====================
    /// A control code's operand bytes run past the message's declared length,
    /// or the message itself lies outside the data buffer.
    #[error("truncated message: needed {needed} bytes at offset {offset:#x}, only {available} available")]
    TruncatedMessage {
        /// Absolute offset into the message data where the read starts.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes actually left.
        available: usize,
    },

    /// A tag value is not a valid hexadecimal number of the required width.
    #[error("invalid hex operand '{value}' for tag [{tag}]")]
    InvalidHexOperand {
        /// The tag name (e.g. `sfx`).
        tag: String,
        /// The offending value.
        value: String,
    },

    /// A character has no byte representation in the game's text encoding.
    #[error("character {0:?} cannot be encoded")]
    UnencodableCharacter(char),

    // ==================== Editing Errors ====================
    /// No message with the given id exists in the table.
    #[error("message {0:#06x} not found")]
    MessageNotFound(u16),

    /// A translation file line could not be parsed.
    #[error("invalid translation file at line {line}: {reason}")]
    InvalidTranslationFile {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedTable {
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for `OcaText` operations.
pub type Result<T> = std::result::Result<T, Error>;
