//! Control codes that carry operand bytes

/// A control code followed by a fixed number of operand bytes.
///
/// Operands are big-endian and are written in shortcode text as
/// `[tag:HEX]`, with two hex digits per operand byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Text color; the operand is a color index (see [`COLORS`](super::symbols::COLORS)).
    Color,
    /// Horizontal shift in pixels.
    Shift,
    /// Jump to another message id.
    TextId,
    /// Box break after a delay.
    BreakDelay,
    /// Close the box after a delay.
    Fade,
    /// Play a sound effect.
    Sfx,
    /// Show an item icon.
    Item,
    /// Per-character printing delay.
    TextSpeed,
    /// Background graphic.
    Background,
    /// Minigame high-score display.
    Minigame,
}

impl Opcode {
    pub const ALL: [Opcode; 10] = [
        Opcode::Color,
        Opcode::Shift,
        Opcode::TextId,
        Opcode::BreakDelay,
        Opcode::Fade,
        Opcode::Sfx,
        Opcode::Item,
        Opcode::TextSpeed,
        Opcode::Background,
        Opcode::Minigame,
    ];

    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x05 => Some(Opcode::Color),
            0x06 => Some(Opcode::Shift),
            0x07 => Some(Opcode::TextId),
            0x0c => Some(Opcode::BreakDelay),
            0x0e => Some(Opcode::Fade),
            0x12 => Some(Opcode::Sfx),
            0x13 => Some(Opcode::Item),
            0x14 => Some(Opcode::TextSpeed),
            0x15 => Some(Opcode::Background),
            0x1e => Some(Opcode::Minigame),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    #[must_use]
    pub fn byte(self) -> u8 {
        match self {
            Opcode::Color => 0x05,
            Opcode::Shift => 0x06,
            Opcode::TextId => 0x07,
            Opcode::BreakDelay => 0x0c,
            Opcode::Fade => 0x0e,
            Opcode::Sfx => 0x12,
            Opcode::Item => 0x13,
            Opcode::TextSpeed => 0x14,
            Opcode::Background => 0x15,
            Opcode::Minigame => 0x1e,
        }
    }

    /// Tag name used in shortcode text
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Opcode::Color => "color",
            Opcode::Shift => "shift",
            Opcode::TextId => "textid",
            Opcode::BreakDelay => "breakdelay",
            Opcode::Fade => "fade",
            Opcode::Sfx => "sfx",
            Opcode::Item => "item",
            Opcode::TextSpeed => "textspeed",
            Opcode::Background => "background",
            Opcode::Minigame => "minigame",
        }
    }

    /// Number of operand bytes following the control code
    #[must_use]
    pub fn operand_width(self) -> usize {
        match self {
            Opcode::TextId | Opcode::Sfx => 2,
            Opcode::Background => 3,
            _ => 1,
        }
    }
}
