//! Message table writing

use super::reader::section_span;
use super::{MAX_OFFSET, MessageTable, RECORD_SIZE, SENTINEL_ID, TERMINAL_ID, TableConfig};
use crate::error::{Error, Result};
use crate::formats::message::{BoxPosition, BoxType, MessageDescriptor, encode_message};
use byteorder::{BigEndian, WriteBytesExt};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Write a table file and its message data file to disk
///
/// If the table file already exists, only the section for
/// `table.config.bank` is replaced; records of other language sections are
/// kept as they are. A missing or empty table file is written from scratch.
///
/// # Errors
/// Returns an error if encoding fails, the existing table has no section for
/// the bank, or either file cannot be read or written.
pub fn write_table<P: AsRef<Path>, Q: AsRef<Path>>(
    table_path: P,
    data_path: Q,
    table: &MessageTable,
) -> Result<()> {
    let table_path = table_path.as_ref();
    let (section, data_bytes) = table.to_bytes()?;

    let table_bytes = match fs::read(table_path) {
        Ok(original) if !original.is_empty() => {
            splice_section(&original, &section, table.config.bank)?
        }
        Ok(_) => section,
        Err(e) if e.kind() == ErrorKind::NotFound => section,
        Err(e) => return Err(e.into()),
    };

    fs::write(table_path, table_bytes)?;
    fs::write(data_path, data_bytes)?;
    Ok(())
}

/// Replace the section for `bank` in `original` with a freshly built one
///
/// `section` ends with a terminal record; it is dropped when the original
/// section was not followed by one.
pub fn splice_section(original: &[u8], section: &[u8], bank: u8) -> Result<Vec<u8>> {
    let span = section_span(original, bank)?;
    let last = &original[span.end - RECORD_SIZE..span.end];
    let had_terminal = last[..2] == TERMINAL_ID.to_be_bytes();
    let section = if had_terminal {
        section
    } else {
        &section[..section.len() - RECORD_SIZE]
    };

    let mut out = Vec::with_capacity(original.len() - span.len() + section.len());
    out.extend_from_slice(&original[..span.start]);
    out.extend_from_slice(section);
    out.extend_from_slice(&original[span.end..]);

    tracing::debug!(
        "Spliced bank {:#04x} section at byte {} ({} -> {} bytes)",
        bank,
        span.start,
        span.len(),
        section.len()
    );
    Ok(out)
}

/// Encode messages into `(table_bytes, message_bytes)` for the English bank
///
/// # Errors
/// See [`build_files_with`].
pub fn build_files(messages: &[MessageDescriptor]) -> Result<(Vec<u8>, Vec<u8>)> {
    build_files_with(messages, &TableConfig::default())
}

/// Encode messages into `(table_bytes, message_bytes)`
///
/// Offsets are recomputed from the encoded lengths; each descriptor's stored
/// offset is ignored. Messages keep the order they are given in.
///
/// # Errors
/// Returns any encoding error from [`encode_message`], or
/// [`Error::MalformedTable`] if the message data outgrows 24-bit offsets.
pub fn build_files_with(
    messages: &[MessageDescriptor],
    config: &TableConfig,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut data = Vec::new();
    let mut offsets = Vec::with_capacity(messages.len());

    for message in messages {
        offsets.push(checked_offset(data.len())?);
        data.extend(encode_message(&message.text)?);
    }
    let end = checked_offset(data.len())?;

    let mut table = Vec::with_capacity((messages.len() + 2) * RECORD_SIZE);
    for (message, &offset) in messages.iter().zip(&offsets) {
        write_record(
            &mut table,
            message.id,
            message.box_type,
            message.position,
            message.bank,
            offset,
        )?;
    }
    write_record(
        &mut table,
        SENTINEL_ID,
        BoxType::Black,
        BoxPosition::Auto,
        config.bank,
        end,
    )?;
    write_record(
        &mut table,
        TERMINAL_ID,
        BoxType::Black,
        BoxPosition::Auto,
        0,
        0,
    )?;

    tracing::debug!(
        "Built {} messages: {} table bytes, {} data bytes",
        messages.len(),
        table.len(),
        data.len()
    );
    Ok((table, data))
}

fn checked_offset(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .filter(|&offset| offset <= MAX_OFFSET)
        .ok_or_else(|| Error::malformed(format!("message data too large: {len} bytes")))
}

fn write_record(
    out: &mut Vec<u8>,
    id: u16,
    box_type: BoxType,
    position: BoxPosition,
    bank: u8,
    offset: u32,
) -> Result<()> {
    out.write_u16::<BigEndian>(id)?;
    out.write_u8((box_type.nibble() << 4) | position.nibble())?;
    out.write_u8(0)?;
    out.write_u8(bank)?;
    out.write_u24::<BigEndian>(offset)?;
    Ok(())
}
