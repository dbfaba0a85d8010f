use clap::Args;
use colossus_resources::{extract::display_name, ResourcesArchive};
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Cursor, path::PathBuf};

#[derive(Args)]
pub struct ListArgs {
    /// An input resources archive
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let archive = ResourcesArchive::new(Cursor::new(data))?;

        println!(
            "{:>12} {:>12}  {:<16} name",
            "size", "stored", "type"
        );
        for index in 0..archive.len() {
            let entry = archive.by_index(index)?;
            println!(
                "{:>12} {:>12}  {:<16} {}",
                entry.uncompressed_size,
                entry.compressed_size,
                entry.type_name.as_deref().unwrap_or("-"),
                display_name(index, entry)
            );
        }

        match archive.decompressed_size() {
            Some(total) => println!("{} records, {total} bytes decompressed", archive.len()),
            None => println!("{} records", archive.len()),
        }

        Ok(())
    }
}
