//! CLI commands for message table operations

use std::path::Path;

use super::TableFiles;
use crate::formats::message::{from_display, to_display};
use crate::formats::table::{
    MessageTable, export_for_translation, import_translations, read_table, write_table,
};

fn load(files: &TableFiles) -> anyhow::Result<MessageTable> {
    let table = read_table(&files.table, &files.data, files.config())?;
    tracing::info!(
        "Loaded {} messages from {}",
        table.len(),
        files.table.display()
    );
    Ok(table)
}

/// List messages with a one-line preview
pub fn list(files: &TableFiles, limit: Option<usize>) -> anyhow::Result<()> {
    let table = load(files)?;
    let limit = limit.unwrap_or(usize::MAX);

    for message in table.messages.iter().take(limit) {
        println!(
            "{:04X}  {:<15} {:<7} {}",
            message.id,
            message.box_type.name(),
            message.position.name(),
            truncate_text(&message.text, 60)
        );
    }

    if table.len() > limit {
        println!("... and {} more", table.len() - limit);
    }

    Ok(())
}

/// Print a single message
pub fn get(files: &TableFiles, id: u16, display: bool) -> anyhow::Result<()> {
    let table = load(files)?;
    let Some(message) = table.get(id) else {
        anyhow::bail!("Message not found: {id:04X}");
    };

    println!("Id: {:04X}", message.id);
    println!("Type: {}", message.box_type.name());
    println!("Position: {}", message.position.name());
    println!("Offset: {:#08x}", message.offset);
    println!("Text:");
    if display {
        println!("{}", to_display(&message.text));
    } else {
        println!("{}", message.text);
    }

    Ok(())
}

/// Search message text
pub fn search(files: &TableFiles, query: &str, limit: usize) -> anyhow::Result<()> {
    let table = load(files)?;
    let matches = table.search(query);

    if matches.is_empty() {
        println!("No messages found containing '{query}'");
        return Ok(());
    }

    println!("Found {} messages containing '{}':", matches.len(), query);
    println!();
    for m in matches.iter().take(limit) {
        let message = &table.messages[m.index];
        println!("{:04X}", message.id);
        println!("  {}", truncate_text(&message.text, 100));
    }

    Ok(())
}

/// Replace one message's text and write both files back
pub fn set(files: &TableFiles, id: u16, text: &str, display: bool) -> anyhow::Result<()> {
    let mut table = load(files)?;
    let text = if display {
        from_display(text)
    } else {
        text.to_string()
    };

    table.set_text(id, text)?;
    write_table(&files.table, &files.data, &table)?;
    println!("Updated message {id:04X}");

    Ok(())
}

/// Export to TSV or JSON
pub fn export(files: &TableFiles, output: &Path, json: bool) -> anyhow::Result<()> {
    let table = load(files)?;

    if json {
        std::fs::write(output, table.to_json()?)?;
        println!("Exported {} messages to {}", table.len(), output.display());
        return Ok(());
    }

    let count = export_for_translation(&table, output)?;
    println!("Exported {} messages to {}", count, output.display());
    println!("\nThe file has 5 columns:");
    println!("  1. Id");
    println!("  2. Box type");
    println!("  3. Position");
    println!("  4. Original text");
    println!("  5. Translation (fill this in)");

    Ok(())
}

/// Import translations and write both files back
pub fn import(files: &TableFiles, translations: &Path, backup: bool) -> anyhow::Result<()> {
    let mut table = load(files)?;

    if backup {
        for path in [&files.table, &files.data] {
            let mut backup_path = path.clone().into_os_string();
            backup_path.push(".bak");
            std::fs::copy(path, &backup_path)?;
            println!("Created backup: {}", Path::new(&backup_path).display());
        }
    }

    let result = import_translations(&mut table, translations)?;
    if result.translated == 0 {
        println!("No translations found in {}", translations.display());
        return Ok(());
    }

    write_table(&files.table, &files.data, &table)?;

    println!("Import complete:");
    println!("  Translated: {}", result.translated);
    println!("  Skipped (empty): {}", result.skipped);
    if result.not_found > 0 {
        println!("  Not found: {}", result.not_found);
        for id in result.missing_ids.iter().take(5) {
            println!("    - {id:04X}");
        }
        if result.missing_ids.len() > 5 {
            println!("    (showing first 5)");
        }
    }

    Ok(())
}

/// Parse and rebuild, comparing against the input files
pub fn rebuild(
    files: &TableFiles,
    out_table: Option<&Path>,
    out_data: Option<&Path>,
) -> anyhow::Result<()> {
    let table = load(files)?;
    let (table_bytes, data_bytes) = table.to_bytes()?;

    let original_table = std::fs::read(&files.table)?;
    let original_data = std::fs::read(&files.data)?;
    // The input may hold other language sections around the one we rebuilt
    let table_same = original_table
        .windows(table_bytes.len())
        .any(|w| w == table_bytes.as_slice());
    let data_same = original_data == data_bytes;

    println!(
        "Index table section: {}",
        if table_same { "identical" } else { "differs" }
    );
    println!(
        "Message data: {} ({} -> {} bytes)",
        if data_same { "identical" } else { "differs" },
        original_data.len(),
        data_bytes.len()
    );

    if let Some(path) = out_table {
        std::fs::write(path, &table_bytes)?;
        println!("Wrote {}", path.display());
    }
    if let Some(path) = out_data {
        std::fs::write(path, &data_bytes)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Truncate text for display
fn truncate_text(text: &str, max_len: usize) -> String {
    let text = text.replace('\n', "\\n");
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text
    }
}
