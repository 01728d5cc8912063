//! Message table reading and parsing

use super::{MessageTable, RECORD_SIZE, SENTINEL_ID, TERMINAL_ID, TableConfig};
use crate::error::{Error, Result};
use crate::formats::message::{BoxPosition, BoxType, MessageDescriptor, decode_message};
use byteorder::{BigEndian, ReadBytesExt};
use std::fs;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;

/// Read a table file and its message data file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if either file cannot be read, or any error from
/// [`parse_table_with`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_table<P: AsRef<Path>, Q: AsRef<Path>>(
    table_path: P,
    data_path: Q,
    config: TableConfig,
) -> Result<MessageTable> {
    let table = fs::read(table_path)?;
    let data = fs::read(data_path)?;
    MessageTable::from_bytes(&table, &data, config)
}

/// Parse the English section of a table and decode every message
///
/// # Errors
///
/// See [`parse_table_with`].
pub fn parse_table(table: &[u8], data: &[u8]) -> Result<Vec<MessageDescriptor>> {
    parse_table_with(table, data, &TableConfig::default())
}

/// Parse the section selected by `config.bank` and decode every message
///
/// Records before the first one with a matching bank are skipped. Reading
/// stops at the `0xfffd` sentinel, which is not part of the result.
///
/// # Errors
///
/// Returns [`Error::MalformedTable`] if no record has the requested bank,
/// the table ends mid-record or before the sentinel, or offsets decrease.
/// Returns [`Error::TruncatedMessage`] if a message cannot be decoded within
/// its length.
pub fn parse_table_with(
    table: &[u8],
    data: &[u8],
    config: &TableConfig,
) -> Result<Vec<MessageDescriptor>> {
    let mut records = read_section(table, config.bank)?;
    tracing::debug!("Read {} records for bank {:#04x}", records.len(), config.bank);

    for i in 0..records.len() - 1 {
        let start = records[i].offset;
        let next = records[i + 1].offset;
        let len = next.checked_sub(start).ok_or_else(|| {
            Error::malformed(format!(
                "message {:#06x} offset {start:#x} is past the next offset {next:#x}",
                records[i].id
            ))
        })?;
        records[i].text = decode_message(data, start as usize, len as usize)?;
    }

    // Drop the sentinel
    records.pop();
    Ok(records)
}

/// Byte range of the section for `bank`: from its first record through the
/// sentinel, plus the terminal record if one follows directly
pub(crate) fn section_span(table: &[u8], bank: u8) -> Result<Range<usize>> {
    let first = table
        .chunks_exact(RECORD_SIZE)
        .position(|record| record[4] == bank)
        .ok_or_else(|| Error::malformed(format!("no section with bank {bank:#04x} found")))?;
    let start = first * RECORD_SIZE;

    let sentinel = table[start..]
        .chunks_exact(RECORD_SIZE)
        .position(|record| record[..2] == SENTINEL_ID.to_be_bytes())
        .ok_or_else(|| Error::malformed("table ends before the end-of-data sentinel"))?;
    let mut end = start + (sentinel + 1) * RECORD_SIZE;

    let next = table.get(end..end + RECORD_SIZE);
    if next.is_some_and(|record| record[..2] == TERMINAL_ID.to_be_bytes()) {
        end += RECORD_SIZE;
    }

    Ok(start..end)
}

/// Read records from the first one in `bank` through the sentinel, inclusive
fn read_section(table: &[u8], bank: u8) -> Result<Vec<MessageDescriptor>> {
    let mut cursor = Cursor::new(table);

    let first = loop {
        let record = read_record(&mut cursor).map_err(|_| {
            Error::malformed(format!("no section with bank {bank:#04x} found"))
        })?;
        if record.bank == bank {
            break record;
        }
    };
    tracing::debug!(
        "Section for bank {:#04x} starts at record {}",
        bank,
        cursor.position() as usize / RECORD_SIZE - 1
    );

    let mut records = vec![first];
    while records.last().is_some_and(|r| r.id != SENTINEL_ID) {
        let record = read_record(&mut cursor)
            .map_err(|_| Error::malformed("table ends before the end-of-data sentinel"))?;
        records.push(record);
    }

    Ok(records)
}

fn read_record(cursor: &mut Cursor<&[u8]>) -> std::io::Result<MessageDescriptor> {
    let id = cursor.read_u16::<BigEndian>()?;
    let flags = cursor.read_u8()?;
    let _reserved = cursor.read_u8()?;
    let bank = cursor.read_u8()?;
    let offset = cursor.read_u24::<BigEndian>()?;

    Ok(MessageDescriptor {
        id,
        box_type: BoxType::from_nibble(flags >> 4),
        position: BoxPosition::from_nibble(flags & 0x0f),
        bank,
        offset,
        text: String::new(),
    })
}
