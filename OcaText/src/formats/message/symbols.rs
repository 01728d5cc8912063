//! Static byte ↔ name tables for the message font and control codes
//!
//! Forward lookups (byte → name) go through a 256-entry table built at compile
//! time; reverse lookups (name → byte) scan the same constant pairs, which are
//! at most a few dozen entries long.

/// First byte of the accented-glyph range.
pub const GLYPH_FIRST: u8 = 0x80;

/// Accented Latin characters in font order, starting at [`GLYPH_FIRST`].
const GLYPHS: [char; 31] = [
    'À', 'î', 'Â', 'Ä', 'Ç', 'È', 'É', 'Ê', 'Ë', 'Ï', 'Ô', 'Ö', 'Ù', 'Û', 'Ü', 'ß', 'à', 'á', 'â',
    'ä', 'ç', 'è', 'é', 'ê', 'ë', 'ï', 'ô', 'ö', 'ù', 'û', 'ü',
];

/// A bidirectional mapping between single bytes and tag names.
pub struct SymbolTable {
    entries: &'static [(u8, &'static str)],
    forward: [Option<&'static str>; 256],
}

impl SymbolTable {
    const fn new(entries: &'static [(u8, &'static str)]) -> Self {
        let mut forward = [None; 256];
        let mut i = 0;
        while i < entries.len() {
            forward[entries[i].0 as usize] = Some(entries[i].1);
            i += 1;
        }
        Self { entries, forward }
    }

    /// Look up the name for a byte
    #[must_use]
    pub fn name(&self, byte: u8) -> Option<&'static str> {
        self.forward[byte as usize]
    }

    /// Look up the byte for a name
    #[must_use]
    pub fn byte(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(b, _)| *b)
    }

    /// All `(byte, name)` pairs in table order
    #[must_use]
    pub fn entries(&self) -> &'static [(u8, &'static str)] {
        self.entries
    }
}

/// Controller button icons, `0x9f..=0xaa`.
pub static BUTTONS: SymbolTable = SymbolTable::new(&[
    (0x9f, "A-button"),
    (0xa0, "B-button"),
    (0xa1, "C-button"),
    (0xa2, "L-button"),
    (0xa3, "R-button"),
    (0xa4, "Z-button"),
    (0xa5, "C-up"),
    (0xa6, "C-down"),
    (0xa7, "C-left"),
    (0xa8, "C-right"),
    (0xa9, "triangle"),
    (0xaa, "Stick"),
]);

/// Operands of the color control code, `0x40..=0x47`.
pub static COLORS: SymbolTable = SymbolTable::new(&[
    (0x40, "default"),
    (0x41, "red"),
    (0x42, "green"),
    (0x43, "blue"),
    (0x44, "lightblue"),
    (0x45, "pink"),
    (0x46, "yellow"),
    (0x47, "black"),
]);

/// Control codes that take no operand.
pub static COMMANDS: SymbolTable = SymbolTable::new(&[
    (0x04, "break"),
    (0x08, "instanton"),
    (0x09, "instantoff"),
    (0x0a, "shop"),
    (0x0b, "event"),
    (0x0d, "waitbutton"),
    (0x0f, "name"),
    (0x10, "ocarina"),
    (0x11, "fade2"),
    (0x16, "marathontime"),
    (0x17, "racetime"),
    (0x18, "points"),
    (0x19, "skulltulas"),
    (0x1a, "noskip"),
    (0x1b, "twochoice"),
    (0x1c, "threechoice"),
    (0x1d, "fishweight"),
    (0x1f, "time"),
]);

/// Map a font byte to its accented character
#[must_use]
pub fn glyph(byte: u8) -> Option<char> {
    byte.checked_sub(GLYPH_FIRST)
        .and_then(|i| GLYPHS.get(i as usize))
        .copied()
}

/// Map an accented character to its font byte
#[must_use]
pub fn glyph_byte(c: char) -> Option<u8> {
    GLYPHS
        .iter()
        .position(|&g| g == c)
        .map(|i| GLYPH_FIRST + i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_range() {
        assert_eq!(glyph(0x80), Some('À'));
        assert_eq!(glyph(0x8f), Some('ß'));
        assert_eq!(glyph(0x9e), Some('ü'));
        assert_eq!(glyph(0x9f), None);
        assert_eq!(glyph(0x7f), None);
        assert_eq!(glyph_byte('é'), Some(0x96));
        assert_eq!(glyph_byte('e'), None);
    }

    #[test]
    fn test_tables_are_bijective() {
        for table in [&BUTTONS, &COLORS, &COMMANDS] {
            for &(byte, name) in table.entries() {
                assert_eq!(table.name(byte), Some(name));
                assert_eq!(table.byte(name), Some(byte));
            }
        }
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(COLORS.byte("red"), Some(0x41));
        assert_eq!(BUTTONS.name(0xaa), Some("Stick"));
        assert_eq!(COMMANDS.name(0x0d), Some("waitbutton"));
        assert_eq!(COMMANDS.name(0x05), None);
        assert_eq!(COMMANDS.byte("color"), None);
    }
}
