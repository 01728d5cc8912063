//! Shortcode text → raw message bytes

use super::opcode::Opcode;
use super::symbols::{BUTTONS, COLORS, COMMANDS, glyph_byte};
use super::{ALIGNMENT, LINE_BREAK, TERMINATOR};
use crate::error::{Error, Result};

/// Encode shortcode text into a terminated, 4-byte aligned byte run
///
/// Unknown `[...]` tags are discarded, and a `[` with no closing `]` is
/// skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidHexOperand`] if a numeric tag's value is not hex
/// or does not fit its operand width, and [`Error::UnencodableCharacter`]
/// for characters above `U+00FF` that are not in the font.
pub fn encode_message(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len() + ALIGNMENT);
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest.find(']') {
                encode_tag(&rest[1..close], &mut out)?;
                rest = &rest[close + 1..];
                continue;
            }
            rest = &rest[1..];
            continue;
        }

        rest = &rest[c.len_utf8()..];
        if c == '\n' {
            out.push(LINE_BREAK);
        } else if let Some(byte) = glyph_byte(c) {
            out.push(byte);
        } else {
            let byte = u8::try_from(u32::from(c)).map_err(|_| Error::UnencodableCharacter(c))?;
            out.push(byte);
        }
    }

    out.push(TERMINATOR);
    while out.len() % ALIGNMENT != 0 {
        out.push(0x00);
    }

    Ok(out)
}

fn encode_tag(tag: &str, out: &mut Vec<u8>) -> Result<()> {
    let (name, value) = match tag.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (tag, None),
    };

    if let Some(byte) = COMMANDS.byte(name) {
        out.push(byte);
        return Ok(());
    }

    if let Some(op) = Opcode::from_tag(name) {
        let value = value.unwrap_or_default();
        if op == Opcode::Color && value.is_empty() {
            tracing::warn!("Discarding [color] tag without a value");
            return Ok(());
        }
        out.push(op.byte());
        if let Some(byte) = (op == Opcode::Color).then(|| COLORS.byte(value)).flatten() {
            out.push(byte);
        } else {
            push_hex_operand(out, name, value, op.operand_width())?;
        }
        return Ok(());
    }

    if let Some(byte) = BUTTONS.byte(name) {
        out.push(byte);
        return Ok(());
    }

    tracing::warn!("Discarding unknown tag [{}]", tag);
    Ok(())
}

fn push_hex_operand(out: &mut Vec<u8>, tag: &str, value: &str, width: usize) -> Result<()> {
    let invalid = || Error::InvalidHexOperand {
        tag: tag.to_string(),
        value: value.to_string(),
    };

    // from_str_radix alone would also take a leading sign
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let parsed = u32::from_str_radix(value, 16).map_err(|_| invalid())?;
    if parsed >> (width * 8) != 0 {
        return Err(invalid());
    }

    let be = parsed.to_be_bytes();
    out.extend_from_slice(&be[be.len() - width..]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sample_message() {
        assert_eq!(
            encode_message("Hey\n[break]").unwrap(),
            vec![0x48, 0x65, 0x79, 0x01, 0x04, 0x02, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_color() {
        assert_eq!(encode_message("[color:red]").unwrap()[..2], [0x05, 0x41]);
        assert_eq!(encode_message("[color:4A]").unwrap()[..2], [0x05, 0x4a]);
    }

    #[test]
    fn test_encode_operand_widths() {
        assert_eq!(encode_message("[textid:103B]").unwrap(), vec![0x07, 0x10, 0x3b, 0x02]);
        assert_eq!(
            encode_message("[sfx:2867]").unwrap(),
            vec![0x12, 0x28, 0x67, 0x02]
        );
        assert_eq!(
            encode_message("[background:0012ab]").unwrap(),
            vec![0x15, 0x00, 0x12, 0xab, 0x02, 0x00, 0x00, 0x00]
        );
        assert_eq!(encode_message("[item:0c]").unwrap(), vec![0x13, 0x0c, 0x02, 0x00]);
    }

    #[test]
    fn test_encode_glyphs_and_buttons() {
        assert_eq!(
            encode_message("é[A-button][Stick]").unwrap(),
            vec![0x96, 0x9f, 0xaa, 0x02]
        );
    }

    #[test]
    fn test_unknown_tag_is_discarded() {
        assert_eq!(encode_message("a[bogus:12]b").unwrap(), vec![b'a', b'b', 0x02, 0x00]);
    }

    #[test]
    fn test_unclosed_bracket_is_skipped() {
        assert_eq!(encode_message("a[b").unwrap(), vec![b'a', b'b', 0x02, 0x00]);
    }

    #[test]
    fn test_latin1_characters_pass_through_as_bytes() {
        assert_eq!(encode_message("\u{7f}").unwrap(), vec![0x7f, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_invalid_hex_operand() {
        assert!(matches!(
            encode_message("[sfx:zz]"),
            Err(Error::InvalidHexOperand { ref tag, ref value }) if tag == "sfx" && value == "zz"
        ));
        assert!(matches!(
            encode_message("[item:100]"),
            Err(Error::InvalidHexOperand { .. })
        ));
        assert!(matches!(
            encode_message("[shift]"),
            Err(Error::InvalidHexOperand { .. })
        ));
    }

    #[test]
    fn test_signed_hex_operand_is_rejected() {
        assert!(matches!(
            encode_message("[item:+1]"),
            Err(Error::InvalidHexOperand { ref tag, ref value }) if tag == "item" && value == "+1"
        ));
        assert!(matches!(
            encode_message("[color:+41]"),
            Err(Error::InvalidHexOperand { ref tag, .. }) if tag == "color"
        ));
        assert!(matches!(
            encode_message("[sfx:-1]"),
            Err(Error::InvalidHexOperand { .. })
        ));
        // Unsigned values of the same width still encode
        assert_eq!(encode_message("[item:01]").unwrap(), vec![0x13, 0x01, 0x02, 0x00]);
    }

    #[test]
    fn test_unencodable_character() {
        assert!(matches!(
            encode_message("→"),
            Err(Error::UnencodableCharacter('→'))
        ));
    }

    #[test]
    fn test_alignment() {
        for text in ["", "a", "ab", "abc", "abcd", "[break][sfx:0001]"] {
            let bytes = encode_message(text).unwrap();
            assert_eq!(bytes.len() % 4, 0, "{text:?}");
            let end = bytes.iter().rposition(|&b| b != 0).unwrap();
            assert_eq!(bytes[end], TERMINATOR);
        }
    }
}
