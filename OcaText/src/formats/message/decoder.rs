//! Raw message bytes → shortcode text

use super::opcode::Opcode;
use super::symbols::{BUTTONS, COLORS, COMMANDS, glyph};
use super::{LINE_BREAK, TERMINATOR};
use crate::error::{Error, Result};

/// Decode `len` bytes of `data` starting at `start` into shortcode text
///
/// Decoding stops at the first terminator byte (`0x02`); anything after it
/// within the declared length is ignored. Bytes with no meaning in the font
/// or control-code set are dropped.
///
/// # Errors
///
/// Returns [`Error::TruncatedMessage`] if the declared range lies outside
/// `data`, or a control code's operands run past the end of the range.
pub fn decode_message(data: &[u8], start: usize, len: usize) -> Result<String> {
    let bytes = start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .ok_or(Error::TruncatedMessage {
            offset: start,
            needed: len,
            available: data.len().saturating_sub(start),
        })?;

    let mut text = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;

        match byte {
            0x00 | 0x03 => {}
            TERMINATOR => break,
            LINE_BREAK => text.push('\n'),
            _ => {
                if let Some(name) = COMMANDS.name(byte) {
                    push_tag(&mut text, name, None);
                } else if let Some(op) = Opcode::from_byte(byte) {
                    let width = op.operand_width();
                    let operand = bytes.get(i..i + width).ok_or(Error::TruncatedMessage {
                        offset: start + i,
                        needed: width,
                        available: bytes.len() - i,
                    })?;
                    i += width;
                    push_operand(&mut text, op, operand);
                } else if let Some(c) = glyph(byte) {
                    text.push(c);
                } else if let Some(name) = BUTTONS.name(byte) {
                    push_tag(&mut text, name, None);
                } else if (0x20..=0x7e).contains(&byte) {
                    text.push(byte as char);
                } else {
                    tracing::trace!("Dropping unknown byte {:#04x} at {:#x}", byte, start + i - 1);
                }
            }
        }
    }

    Ok(text)
}

fn push_operand(text: &mut String, op: Opcode, operand: &[u8]) {
    if let (Opcode::Color, Some(name)) = (op, COLORS.name(operand[0])) {
        push_tag(text, op.tag(), Some(name));
        return;
    }

    let value = operand
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
    let hex = format!("{value:0width$X}", width = operand.len() * 2);
    push_tag(text, op.tag(), Some(&hex));
}

fn push_tag(text: &mut String, name: &str, value: Option<&str>) {
    text.push('[');
    text.push_str(name);
    if let Some(value) = value {
        text.push(':');
        text.push_str(value);
    }
    text.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> String {
        decode_message(bytes, 0, bytes.len()).unwrap()
    }

    #[test]
    fn test_decode_plain_text_and_break() {
        assert_eq!(decode(&[0x48, 0x65, 0x79, 0x01, 0x04, 0x02]), "Hey\n[break]");
    }

    #[test]
    fn test_decode_stops_at_terminator() {
        assert_eq!(decode(&[b'A', 0x02, b'B', 0x00]), "A");
    }

    #[test]
    fn test_decode_skips_padding_and_unknown_bytes() {
        assert_eq!(decode(&[0x00, b'a', 0x03, 0xff, 0x7f, b'b', 0x02]), "ab");
    }

    #[test]
    fn test_decode_operand_codes() {
        assert_eq!(decode(&[0x05, 0x41, b'x', 0x05, 0x40]), "[color:red]x[color:default]");
        assert_eq!(decode(&[0x05, 0x4a]), "[color:4A]");
        assert_eq!(decode(&[0x06, 0x1e]), "[shift:1E]");
        assert_eq!(decode(&[0x07, 0x10, 0x3b]), "[textid:103B]");
        assert_eq!(decode(&[0x0c, 0x05]), "[breakdelay:05]");
        assert_eq!(decode(&[0x0e, 0x5a]), "[fade:5A]");
        assert_eq!(decode(&[0x12, 0x28, 0x67]), "[sfx:2867]");
        assert_eq!(decode(&[0x13, 0x0c]), "[item:0C]");
        assert_eq!(decode(&[0x14, 0x01]), "[textspeed:01]");
        assert_eq!(decode(&[0x15, 0x00, 0x12, 0xab]), "[background:0012AB]");
        assert_eq!(decode(&[0x1e, 0x02]), "[minigame:02]");
    }

    #[test]
    fn test_decode_glyphs_and_buttons() {
        assert_eq!(decode(&[0x96, b't', 0x96]), "été");
        assert_eq!(decode(&[0x9f, b' ', 0xaa]), "[A-button] [Stick]");
        assert_eq!(decode(&[0x0f, 0x0d]), "[name][waitbutton]");
    }

    #[test]
    fn test_decode_window_inside_buffer() {
        let data = [b'x', b'H', b'i', 0x02, b'y'];
        assert_eq!(decode_message(&data, 1, 3).unwrap(), "Hi");
    }

    #[test]
    fn test_truncated_operand_is_an_error() {
        let err = decode_message(&[b'a', 0x12, 0x28], 0, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedMessage { offset: 2, needed: 2, available: 1 }
        ));
    }

    #[test]
    fn test_operand_past_declared_length_is_an_error() {
        // The operand exists in the buffer but not within the message.
        let data = [0x07, 0x10, 0x3b];
        assert!(matches!(
            decode_message(&data, 0, 2),
            Err(Error::TruncatedMessage { .. })
        ));
    }

    #[test]
    fn test_range_outside_buffer_is_an_error() {
        assert!(matches!(
            decode_message(&[b'a'], 0, 4),
            Err(Error::TruncatedMessage { offset: 0, needed: 4, available: 1 })
        ));
        assert!(decode_message(&[b'a'], 3, 0).is_err());
    }
}
