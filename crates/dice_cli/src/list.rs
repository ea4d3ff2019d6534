//! `dice list`: prints the index of an archive.

use std::path::Path;

use dice_archive::{Archive, ArchiveEntry};
use serde::Serialize;

use crate::ListFormat;

/// One row of the listing.
#[derive(Debug, Serialize)]
struct Listed<'a> {
    name: &'a str,
    offset: u64,
    len: u64,
}

impl<'a> From<&'a ArchiveEntry> for Listed<'a> {
    fn from(entry: &'a ArchiveEntry) -> Self {
        Self {
            name: &entry.name,
            offset: entry.offset,
            len: entry.len,
        }
    }
}

fn render(archive: &Archive, format: ListFormat) -> Result<String, serde_json::Error> {
    let rows: Vec<Listed> = archive.entries().iter().map(Listed::from).collect();
    match format {
        ListFormat::Json => serde_json::to_string_pretty(&rows),
        ListFormat::Text => {
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            let mut out = String::new();
            for r in &rows {
                out.push_str(&format!(
                    "{:<width$}  {:>10}  {:>10}\n",
                    r.name, r.offset, r.len
                ));
            }
            out.push_str(&format!(
                "{} entries, {} bytes\n",
                rows.len(),
                archive.archive_size()
            ));
            Ok(out)
        }
    }
}

/// Runs the `dice list` command.
pub fn run(path: &Path, format: ListFormat) -> Result<i32, Box<dyn std::error::Error>> {
    let archive = Archive::load(path)?;
    print!("{}", render(&archive, format)?);
    Ok(0)
}
