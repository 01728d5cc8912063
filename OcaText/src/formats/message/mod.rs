//! Message text encoding
//!
//! Messages are stored as variable-length byte runs mixing font bytes with
//! control codes. This module converts between those runs and "shortcode"
//! text, where control codes appear as bracketed tags:
//!
//! ```text
//! Hello, [name]![break]
//! [color:red]Watch out[color:default] for the [A-button] button.
//! ```

mod decoder;
mod display;
mod encoder;
pub mod opcode;
pub mod symbols;

pub use decoder::decode_message;
pub use display::{from_display, to_display};
pub use encoder::encode_message;
pub use opcode::Opcode;

use serde::{Deserialize, Serialize};

/// Line break control code
pub const LINE_BREAK: u8 = 0x01;

/// End-of-message control code
pub const TERMINATOR: u8 = 0x02;

/// Encoded messages are zero-padded to a multiple of this many bytes
pub const ALIGNMENT: usize = 4;

/// Text box style, stored in the high nibble of a table record's flags byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxType {
    #[default]
    Black,
    Wood,
    Blue,
    Ocarina,
    None,
    NoneBlackText,
    /// A nibble outside the known styles, kept so it re-serializes unchanged
    Unknown(u8),
}

impl BoxType {
    #[must_use]
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0f {
            0 => BoxType::Black,
            1 => BoxType::Wood,
            2 => BoxType::Blue,
            3 => BoxType::Ocarina,
            4 => BoxType::None,
            5 => BoxType::NoneBlackText,
            n => BoxType::Unknown(n),
        }
    }

    #[must_use]
    pub fn nibble(self) -> u8 {
        match self {
            BoxType::Black => 0,
            BoxType::Wood => 1,
            BoxType::Blue => 2,
            BoxType::Ocarina => 3,
            BoxType::None => 4,
            BoxType::NoneBlackText => 5,
            BoxType::Unknown(n) => n & 0x0f,
        }
    }

    /// Short lowercase name, as used by the CLI and translation files
    #[must_use]
    pub fn name(self) -> String {
        match self {
            BoxType::Black => "black".into(),
            BoxType::Wood => "wood".into(),
            BoxType::Blue => "blue".into(),
            BoxType::Ocarina => "ocarina".into(),
            BoxType::None => "none".into(),
            BoxType::NoneBlackText => "none-black-text".into(),
            BoxType::Unknown(n) => n.to_string(),
        }
    }

    /// Parse a name produced by [`BoxType::name`]
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(BoxType::Black),
            "wood" => Some(BoxType::Wood),
            "blue" => Some(BoxType::Blue),
            "ocarina" => Some(BoxType::Ocarina),
            "none" => Some(BoxType::None),
            "none-black-text" => Some(BoxType::NoneBlackText),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|n| *n < 16)
                .map(BoxType::from_nibble),
        }
    }
}

/// Vertical text box placement, stored in the low nibble of the flags byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxPosition {
    #[default]
    Auto,
    Top,
    Middle,
    Bottom,
    Unknown(u8),
}

impl BoxPosition {
    #[must_use]
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0f {
            0 => BoxPosition::Auto,
            1 => BoxPosition::Top,
            2 => BoxPosition::Middle,
            3 => BoxPosition::Bottom,
            n => BoxPosition::Unknown(n),
        }
    }

    #[must_use]
    pub fn nibble(self) -> u8 {
        match self {
            BoxPosition::Auto => 0,
            BoxPosition::Top => 1,
            BoxPosition::Middle => 2,
            BoxPosition::Bottom => 3,
            BoxPosition::Unknown(n) => n & 0x0f,
        }
    }

    #[must_use]
    pub fn name(self) -> String {
        match self {
            BoxPosition::Auto => "auto".into(),
            BoxPosition::Top => "top".into(),
            BoxPosition::Middle => "middle".into(),
            BoxPosition::Bottom => "bottom".into(),
            BoxPosition::Unknown(n) => n.to_string(),
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(BoxPosition::Auto),
            "top" => Some(BoxPosition::Top),
            "middle" => Some(BoxPosition::Middle),
            "bottom" => Some(BoxPosition::Bottom),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|n| *n < 16)
                .map(BoxPosition::from_nibble),
        }
    }
}

/// One message: its table record fields plus decoded text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Message id
    pub id: u16,
    /// Text box style
    pub box_type: BoxType,
    /// Text box placement
    pub position: BoxPosition,
    /// Language/data section this record belongs to
    pub bank: u8,
    /// Byte offset of the encoded message in the data blob (24-bit)
    pub offset: u32,
    /// Shortcode text
    pub text: String,
}

impl MessageDescriptor {
    /// Create a descriptor with default box settings
    pub fn new(id: u16, bank: u8, text: impl Into<String>) -> Self {
        Self {
            id,
            bank,
            text: text.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nibbles_round_trip() {
        for n in 0..16 {
            assert_eq!(BoxType::from_nibble(n).nibble(), n);
            assert_eq!(BoxPosition::from_nibble(n).nibble(), n);
        }
        assert_eq!(BoxType::from_nibble(3), BoxType::Ocarina);
        assert_eq!(BoxPosition::from_nibble(3), BoxPosition::Bottom);
        assert_eq!(BoxType::from_nibble(9), BoxType::Unknown(9));
    }

    #[test]
    fn test_names_round_trip() {
        for n in 0..16 {
            let box_type = BoxType::from_nibble(n);
            assert_eq!(BoxType::from_name(&box_type.name()), Some(box_type));
            let position = BoxPosition::from_nibble(n);
            assert_eq!(BoxPosition::from_name(&position.name()), Some(position));
        }
        assert_eq!(BoxType::from_name("purple"), None);
        assert_eq!(BoxPosition::from_name("16"), None);
    }

    #[test]
    fn test_shortcode_round_trip() {
        let text = "[color:lightblue]Navi[color:default] says:\n\
                    Press [C-up] to talk![waitbutton][break]\
                    [sfx:6844][item:0C]Über à [textid:0103][textspeed:02]\
                    [background:00FF10][minigame:01][shift:0A][fade:3C][breakdelay:14]";
        let bytes = encode_message(text).unwrap();
        assert_eq!(decode_message(&bytes, 0, bytes.len()).unwrap(), text);
    }

    #[test]
    fn test_sample_display_round_trip() {
        let raw = [0x48, 0x65, 0x79, 0x01, 0x04, 0x02];
        let text = decode_message(&raw, 0, raw.len()).unwrap();
        assert_eq!(text, "Hey\n[break]");

        let display = to_display(&text);
        assert_eq!(display, "Hey\n\n[break]\n");

        let encoded = encode_message(&from_display(&display)).unwrap();
        assert_eq!(encoded, [0x48, 0x65, 0x79, 0x01, 0x04, 0x02, 0x00, 0x00]);
    }
}
