//! Catalog export.

use std::path::Path;
use std::str::FromStr;

use verso_core::model::Song;

use crate::error::{ImportError, ImportResult};
use crate::import::{ARTIST_HEADER, TITLE_HEADER};

/// A file format verso can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "txt" => Ok(Self::Txt),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Pretty-printed JSON array of songs, non-ASCII text kept as is.
pub fn to_json(songs: &[Song]) -> ImportResult<String> {
    serde_json::to_string_pretty(songs).map_err(|e| ImportError::Core(e.into()))
}

/// The TXT import format: header lines, the lyric, then a blank line.
#[must_use]
pub fn to_txt(songs: &[Song]) -> String {
    songs
        .iter()
        .map(|song| {
            format!(
                "{ARTIST_HEADER}：{}\n{TITLE_HEADER}：{}\n{}\n\n",
                song.artist(),
                song.title(),
                song.lyric()
            )
        })
        .collect()
}

/// Write `songs` to `path` in `format`, creating parent directories.
pub fn export_songs(songs: &[Song], path: &Path, format: ExportFormat) -> ImportResult<()> {
    let content = match format {
        ExportFormat::Json => to_json(songs)?,
        ExportFormat::Txt => to_txt(songs),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ImportError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ImportError::io(path, e))?;
    log::info!("Exported {} songs to {}", songs.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{import_str, SourceFormat};

    fn songs() -> Vec<Song> {
        vec![
            Song::new("周杰伦", "晴天", "故事的小黄花\n\n从出生那年就飘着").unwrap(),
            Song::new("Adele", "Hello", "Hello from the other side").unwrap(),
        ]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path(Path::new("out.txt")), Some(ExportFormat::Txt));
        assert_eq!(ExportFormat::from_path(Path::new("out.lrc")), None);
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let json = to_json(&songs()).unwrap();
        assert!(json.contains("周杰伦"));
        assert!(json.contains("\n  {"));
    }

    #[test]
    fn test_txt_reimports() {
        let original = songs();
        let report = import_str(&to_txt(&original), SourceFormat::Txt, "export.txt", "export");
        assert_eq!(report.failed(), 0);
        assert_eq!(report.imported(), 2);
        for (before, after) in original.iter().zip(&report.songs) {
            assert_eq!(before.artist(), after.artist());
            assert_eq!(before.title(), after.title());
            assert_eq!(before.lyric(), after.lyric());
        }
    }

    #[test]
    fn test_json_reimports() {
        let report = import_str(&to_json(&songs()).unwrap(), SourceFormat::Json, "e.json", "e");
        assert_eq!(report.imported(), 2);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("songs.txt");
        export_songs(&songs(), &path, ExportFormat::Txt).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("歌手：周杰伦\n歌名：晴天\n"));
    }
}
