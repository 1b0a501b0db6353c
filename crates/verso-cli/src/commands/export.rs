use anyhow::{anyhow, Result};
use std::path::Path;
use verso_etl::{export_songs, ExportFormat};

use super::Session;

pub fn run_export(session: &Session, path: &Path, format: Option<&str>) -> Result<()> {
    let format = match format {
        Some(name) => name.parse::<ExportFormat>().map_err(|e| anyhow!(e))?,
        None => ExportFormat::from_path(path).ok_or_else(|| {
            anyhow!(
                "Cannot tell the export format from {}; pass --format json or --format txt",
                path.display()
            )
        })?,
    };

    let catalog = session.catalog()?;
    export_songs(catalog.songs(), path, format)?;
    println!("Exported {} songs to {}", catalog.len(), path.display());
    Ok(())
}
