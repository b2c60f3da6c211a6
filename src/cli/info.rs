use anyhow::{Context, Result};
use std::path::PathBuf;

use idxml_psm::reader::PsmReader;

/// Display information about a PSM Parquet file
pub fn run(file: PathBuf) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = PsmReader::open(&file).context("Failed to read Parquet file")?;

    println!("PSM File Information");
    println!("====================");
    println!("File: {}", file.display());
    println!();

    println!("File Statistics:");
    println!("  Row groups: {}", reader.num_row_groups());
    println!("  Total rows: {}", reader.num_rows());
    match reader.validate() {
        Ok(()) => println!("  PSM schema: valid"),
        Err(e) => println!("  PSM schema: {}", e),
    }
    println!();

    let metadata = reader.metadata();
    if !metadata.is_empty() {
        let mut keys: Vec<_> = metadata.keys().collect();
        keys.sort();
        println!("Metadata Keys:");
        for key in keys {
            let value = &metadata[key];
            let preview = if value.len() > 100 {
                let cut = (0..=100).rev().find(|&i| value.is_char_boundary(i)).unwrap_or(0);
                format!("{}... ({} bytes)", &value[..cut], value.len())
            } else {
                value.clone()
            };
            println!("  {}: {}", key, preview);
        }
        println!();
    }

    println!("Schema:");
    let schema = reader.schema();
    for (i, field) in schema.fields().iter().enumerate() {
        let nullable = if field.is_nullable() { "" } else { ", required" };
        println!("  {:3}. {} ({}{})", i + 1, field.name(), field.data_type(), nullable);
    }

    Ok(())
}
