//! Translation workflow support
//!
//! Export a message table to TSV for translators, import the translated TSV
//! back.
//!
//! # TSV Format
//!
//! Columns:
//! 1. Id (4 hex digits)
//! 2. Box type
//! 3. Position
//! 4. Original text
//! 5. Translation (empty on export, filled by translator)
//!
//! Line breaks, tabs and backslashes inside text are written as `\n`, `\t`
//! and `\\` so that each message stays on one line.
//!
//! ```tsv
//! Id\tType\tPosition\tOriginal\tTranslation
//! 0001\tblack\tauto\tHey\n[break]\t
//! ```

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::MessageTable;
use crate::error::{Error, Result};
use crate::formats::message::encode_message;

const HEADER: &str = "Id\tType\tPosition\tOriginal\tTranslation";

/// Result of importing translations
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of messages updated with translations
    pub translated: usize,
    /// Number of rows with an empty translation column
    pub skipped: usize,
    /// Number of ids not found in the table
    pub not_found: usize,
    /// Ids that were not found
    pub missing_ids: Vec<u16>,
}

/// Export a message table to a translation file
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn export_for_translation<P: AsRef<Path>>(table: &MessageTable, path: P) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{HEADER}")?;
    for message in &table.messages {
        writeln!(
            writer,
            "{:04X}\t{}\t{}\t{}\t",
            message.id,
            message.box_type.name(),
            message.position.name(),
            escape(&message.text)
        )?;
    }

    writer.flush()?;
    Ok(table.messages.len())
}

/// Import translations from a TSV file
///
/// Only rows with a non-empty translation column update the table. Every row
/// is read and every translation checked to be encodable before any of them
/// is applied, so a failed import leaves the table unchanged.
///
/// # Errors
/// Returns [`Error::InvalidTranslationFile`] for rows with a bad id or too
/// few columns, or an encoding error for an untranslatable row.
pub fn import_translations<P: AsRef<Path>>(
    table: &mut MessageTable,
    path: P,
) -> Result<ImportResult> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let mut result = ImportResult::default();
    let mut rows = Vec::new();

    // Line 1 is the header
    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 5 {
            return Err(Error::InvalidTranslationFile {
                line: line_no,
                reason: format!("expected 5 columns, found {}", parts.len()),
            });
        }

        let id = u16::from_str_radix(parts[0].trim(), 16).map_err(|_| {
            Error::InvalidTranslationFile {
                line: line_no,
                reason: format!("invalid message id '{}'", parts[0]),
            }
        })?;

        let translation = unescape(parts[4]);
        if translation.is_empty() {
            result.skipped += 1;
            continue;
        }

        encode_message(&translation)?;
        rows.push((id, translation));
    }

    for (id, translation) in rows {
        if let Some(message) = table.get_mut(id) {
            message.text = translation;
            result.translated += 1;
        } else {
            result.not_found += 1;
            result.missing_ids.push(id);
        }
    }

    tracing::debug!(
        "Imported {} translations ({} skipped, {} not found)",
        result.translated,
        result.skipped,
        result.not_found
    );
    Ok(result)
}

// ============================================================================
// Helper functions
// ============================================================================

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
