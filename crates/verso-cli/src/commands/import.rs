use anyhow::{Context, Result};
use std::path::PathBuf;
use verso_etl::{import_path, ImportReport};

use super::Session;

pub fn run_import(session: &Session, paths: &[PathBuf], dry_run: bool) -> Result<()> {
    let mut report = ImportReport::default();
    for path in paths {
        let part = import_path(path).with_context(|| format!("Failed to import {}", path.display()))?;
        report.merge(part);
    }

    println!("\n📥 Import\n");
    println!("  Files read: {}", report.files);
    println!("  Songs imported: {}", report.imported());
    println!("  Records skipped: {}", report.failed());
    for failure in &report.failures {
        println!("    - {failure}");
    }

    if dry_run {
        for song in &report.songs {
            println!("  would add: {} - {}", song.title(), song.artist());
        }
        println!("\n  Dry run: library not changed");
        return Ok(());
    }

    if report.songs.is_empty() {
        return Ok(());
    }

    let mut catalog = session.catalog()?;
    for song in report.songs {
        catalog.add(song)?;
    }
    session.save(&catalog)?;
    println!(
        "\n  Library now holds {} songs ({})",
        catalog.len(),
        session.config.library_path.display()
    );

    Ok(())
}
