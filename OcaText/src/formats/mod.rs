//! File format modules

pub mod message;
pub mod table;

pub use message::MessageDescriptor;
pub use table::MessageTable;
