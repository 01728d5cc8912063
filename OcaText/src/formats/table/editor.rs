//! Message table editing operations
//!
//! Lookup by id, text updates, and case-insensitive search.

use super::MessageTable;
use crate::error::{Error, Result};
use crate::formats::message::{BoxPosition, BoxType, MessageDescriptor, encode_message};

/// A message that matched a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Index into [`MessageTable::messages`]
    pub index: usize,
    /// Message id
    pub id: u16,
}

impl MessageTable {
    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the table has no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// First message with the given id
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&MessageDescriptor> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// First message with the given id, mutably
    pub fn get_mut(&mut self, id: u16) -> Option<&mut MessageDescriptor> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Message ids in table order
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.messages.iter().map(|m| m.id)
    }

    /// Replace a message's text
    ///
    /// The text is encoded once up front so that an invalid tag is reported
    /// here rather than when the table is saved.
    ///
    /// # Errors
    /// Returns [`Error::MessageNotFound`] if no message has this id, or the
    /// encoding error if the text cannot be encoded.
    pub fn set_text(&mut self, id: u16, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        encode_message(&text)?;
        let message = self.get_mut(id).ok_or(Error::MessageNotFound(id))?;
        message.text = text;
        Ok(())
    }

    /// Change a message's text box style and placement
    ///
    /// # Errors
    /// Returns [`Error::MessageNotFound`] if no message has this id.
    pub fn set_box(&mut self, id: u16, box_type: BoxType, position: BoxPosition) -> Result<()> {
        let message = self.get_mut(id).ok_or(Error::MessageNotFound(id))?;
        message.box_type = box_type;
        message.position = position;
        Ok(())
    }

    /// Messages whose text contains `query`, ignoring case
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchMatch> {
        let query = query.to_lowercase();
        self.messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.text.to_lowercase().contains(&query))
            .map(|(index, m)| SearchMatch { index, id: m.id })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::table::BANK_ENGLISH;

    fn table() -> MessageTable {
        MessageTable {
            messages: vec![
                MessageDescriptor::new(0x0001, BANK_ENGLISH, "Hello, [name]!"),
                MessageDescriptor::new(0x0002, BANK_ENGLISH, "Open the chest with [A-button]."),
                MessageDescriptor::new(0x0003, BANK_ENGLISH, "HELLO again"),
            ],
            ..MessageTable::default()
        }
    }

    #[test]
    fn test_get_and_ids() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(2).unwrap().text, "Open the chest with [A-button].");
        assert!(table.get(9).is_none());
        assert_eq!(table.ids().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_set_text() {
        let mut table = table();
        table.set_text(1, "Bye").unwrap();
        assert_eq!(table.get(1).unwrap().text, "Bye");

        assert!(matches!(table.set_text(9, "x"), Err(Error::MessageNotFound(9))));
        assert!(matches!(
            table.set_text(1, "[sfx:nope]"),
            Err(Error::InvalidHexOperand { .. })
        ));
        assert_eq!(table.get(1).unwrap().text, "Bye");
    }

    #[test]
    fn test_set_box() {
        let mut table = table();
        table.set_box(3, BoxType::Wood, BoxPosition::Middle).unwrap();
        let message = table.get(3).unwrap();
        assert_eq!(message.box_type, BoxType::Wood);
        assert_eq!(message.position, BoxPosition::Middle);
    }

    #[test]
    fn test_search_case_insensitive() {
        let table = table();
        let ids: Vec<u16> = table.search("hello").iter().map(|m| m.id).collect();
        assert_eq!(ids, [1, 3]);
        assert!(table.search("zelda").is_empty());
    }
}
