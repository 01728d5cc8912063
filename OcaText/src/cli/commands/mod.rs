use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::formats::table::{BANK_ENGLISH, TableConfig};

pub mod table;

/// Parse a hex number with an optional `0x` prefix
fn parse_hex<T: TryFrom<u32>>(s: &str) -> Result<T, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    Some(digits)
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|d| u32::from_str_radix(d, 16).ok())
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| format!("Invalid hex value '{s}'"))
}

fn parse_id(s: &str) -> Result<u16, String> {
    parse_hex(s)
}

fn parse_bank(s: &str) -> Result<u8, String> {
    parse_hex(s)
}

/// The pair of files that make up a message table
#[derive(Args, Debug, Clone)]
pub struct TableFiles {
    /// Index table file
    #[arg(short, long)]
    pub table: PathBuf,

    /// Message data file
    #[arg(short, long)]
    pub data: PathBuf,

    /// Language bank to read (hex)
    #[arg(short, long, default_value_t = BANK_ENGLISH, value_parser = parse_bank)]
    pub bank: u8,
}

impl TableFiles {
    pub fn config(&self) -> TableConfig {
        TableConfig { bank: self.bank }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List messages in a table
    List {
        #[command(flatten)]
        files: TableFiles,

        /// Maximum messages to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a single message by id
    Get {
        #[command(flatten)]
        files: TableFiles,

        /// Message id (hex)
        #[arg(value_parser = parse_id)]
        id: u16,

        /// Put box breaks on their own lines
        #[arg(long)]
        display: bool,
    },

    /// Search for messages containing text
    Search {
        #[command(flatten)]
        files: TableFiles,

        /// Text to search for (case-insensitive)
        query: String,

        /// Maximum results to return
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Replace a message's text and save the table
    Set {
        #[command(flatten)]
        files: TableFiles,

        /// Message id (hex)
        #[arg(value_parser = parse_id)]
        id: u16,

        /// New shortcode text
        text: String,

        /// Text is in display form (box breaks on their own lines)
        #[arg(long)]
        display: bool,
    },

    /// Export messages to a TSV translation file or JSON
    Export {
        #[command(flatten)]
        files: TableFiles,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Write JSON instead of TSV
        #[arg(long)]
        json: bool,
    },

    /// Import translations from a TSV file and save the table
    Import {
        #[command(flatten)]
        files: TableFiles,

        /// Translation file
        translations: PathBuf,

        /// Keep a copy of the original files as .bak
        #[arg(long)]
        backup: bool,
    },

    /// Parse and rebuild a table, reporting whether the output is identical
    Rebuild {
        #[command(flatten)]
        files: TableFiles,

        /// Write the rebuilt index table here
        #[arg(long)]
        out_table: Option<PathBuf>,

        /// Write the rebuilt message data here
        #[arg(long)]
        out_data: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::List { files, limit } => table::list(files, *limit),
            Commands::Get { files, id, display } => table::get(files, *id, *display),
            Commands::Search {
                files,
                query,
                limit,
            } => table::search(files, query, *limit),
            Commands::Set {
                files,
                id,
                text,
                display,
            } => table::set(files, *id, text, *display),
            Commands::Export {
                files,
                output,
                json,
            } => table::export(files, output, *json),
            Commands::Import {
                files,
                translations,
                backup,
            } => table::import(files, translations, *backup),
            Commands::Rebuild {
                files,
                out_table,
                out_data,
            } => table::rebuild(files, out_table.as_deref(), out_data.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_id("0x0103"), Ok(0x0103));
        assert_eq!(parse_id("fffd"), Ok(0xfffd));
        assert!(parse_id("10000").is_err());
        assert_eq!(parse_bank("07"), Ok(0x07));
        assert!(parse_bank("zz").is_err());
        assert!(parse_id("+103").is_err());
        assert!(parse_id("0x").is_err());
    }
}
