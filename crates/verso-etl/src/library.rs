//! The library file: the whole catalog as a JSON array of songs.

use std::path::Path;

use verso_core::model::Catalog;

use crate::error::{ImportError, ImportResult};

/// Load the catalog at `path`. A missing file is an empty catalog.
///
/// # Errors
///
/// Fails when the file exists but cannot be read, is not a JSON array of
/// valid songs, or repeats a song id.
pub fn load_library(path: &Path) -> ImportResult<Catalog> {
    if !path.exists() {
        log::info!("No library at {}; starting empty", path.display());
        return Ok(Catalog::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::io(path, e))?;
    let catalog: Catalog =
        serde_json::from_str(&content).map_err(|e| ImportError::json(path, e))?;
    log::debug!("Loaded {} songs from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Write the catalog to `path`, creating parent directories.
///
/// The file is written next to its destination and renamed into place, so
/// an interrupted save leaves the previous library intact.
pub fn save_library(path: &Path, catalog: &Catalog) -> ImportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ImportError::io(parent, e))?;
    }
    let content = serde_json::to_string_pretty(catalog).map_err(|e| ImportError::json(path, e))?;

    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, content).map_err(|e| ImportError::io(&staging, e))?;
    std::fs::rename(&staging, path).map_err(|e| ImportError::io(path, e))?;

    log::debug!("Saved {} songs to {}", catalog.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_core::model::Song;

    #[test]
    fn test_missing_library_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_library(&dir.path().join("library.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("library.json");

        let mut catalog = Catalog::new();
        let id = catalog.add(Song::new("周杰伦", "晴天", "故事的小黄花").unwrap()).unwrap();
        save_library(&path, &catalog).unwrap();

        let loaded = load_library(&path).unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(loaded.get(id).map(Song::title), Some("晴天"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_library_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(load_library(&path), Err(ImportError::Json { .. })));
    }

    #[test]
    fn test_invalid_song_in_library_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"[{"artist":"","title":"T","lyric":"x"}]"#).unwrap();
        assert!(load_library(&path).is_err());
    }
}
