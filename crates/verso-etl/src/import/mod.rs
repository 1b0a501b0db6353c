//! Lyric file import.
//!
//! Each format parser turns file content into raw records; every record is
//! then validated into a [`Song`]. A record that fails validation is listed
//! in the [`ImportReport`] and the rest of the batch carries on.

mod json;
mod lrc;
mod txt;

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use walkdir::WalkDir;

use verso_core::model::Song;

use crate::error::{ImportError, ImportResult};

pub use lrc::UNKNOWN_ARTIST;
pub(crate) use txt::{ARTIST_HEADER, TITLE_HEADER};

// Constant patterns; unwrap cannot fail.
#[allow(clippy::unwrap_used)]
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).unwrap());

/// A lyric file format verso can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Lrc,
    Txt,
    Json,
}

impl SourceFormat {
    /// The format implied by a file extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "lrc" => Some(Self::Lrc),
            "txt" => Some(Self::Txt),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lrc => "lrc",
            Self::Txt => "txt",
            Self::Json => "json",
        })
    }
}

/// Fields of one record before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct RawSong {
    pub artist: String,
    pub title: String,
    pub lyric: String,
}

/// One record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// File, plus the record's position when the file holds several.
    pub source: String,
    pub reason: String,
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

/// Songs and failures from one import run.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub songs: Vec<Song>,
    pub failures: Vec<ImportFailure>,
    /// Files read, whether or not they produced songs.
    pub files: usize,
}

impl ImportReport {
    #[must_use]
    pub fn imported(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn merge(&mut self, other: Self) {
        self.songs.extend(other.songs);
        self.failures.extend(other.failures);
        self.files += other.files;
    }

    fn fail(&mut self, source: impl Into<String>, reason: impl fmt::Display) {
        let failure = ImportFailure {
            source: source.into(),
            reason: reason.to_string(),
        };
        log::warn!("Skipped {}", failure);
        self.failures.push(failure);
    }

    fn accept(&mut self, source: String, raw: RawSong) {
        match Song::new(raw.artist, raw.title, raw.lyric) {
            Ok(song) => {
                log::debug!("Imported {} - {}", song.title(), song.artist());
                self.songs.push(song);
            }
            Err(e) => self.fail(source, e),
        }
    }
}

/// Import a file, or every supported file under a directory.
///
/// Directories are walked recursively; files with other extensions are
/// ignored there. A file that cannot be read becomes a failure entry.
///
/// # Errors
///
/// Fails only when `path` itself is missing or is a single file of an
/// unsupported format.
pub fn import_path(path: &Path) -> ImportResult<ImportReport> {
    let metadata = std::fs::metadata(path).map_err(|e| ImportError::io(path, e))?;
    if metadata.is_file() {
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| ImportError::UnsupportedFormat(path.to_path_buf()))?;
        return Ok(import_file(path, format));
    }

    let mut report = ImportReport::default();
    for entry in WalkDir::new(path).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let source = e.path().unwrap_or(path).display().to_string();
                report.fail(source, e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(format) = SourceFormat::from_path(entry.path()) {
            report.merge(import_file(entry.path(), format));
        }
    }

    log::info!(
        "Imported {} songs from {} files under {} ({} failed)",
        report.imported(),
        report.files,
        path.display(),
        report.failed()
    );
    Ok(report)
}

/// Import one file. Read failures are recorded, not returned.
#[must_use]
pub fn import_file(path: &Path, format: SourceFormat) -> ImportReport {
    let source = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(content) => import_str(&content, format, &source, &default_title(path)),
        Err(e) => {
            let mut report = ImportReport {
                files: 1,
                ..ImportReport::default()
            };
            report.fail(source, ImportError::io(path, e));
            report
        }
    }
}

/// Import already-read content.
///
/// `default_title` names an LRC song whose content carries no title.
#[must_use]
pub fn import_str(
    content: &str,
    format: SourceFormat,
    source: &str,
    default_title: &str,
) -> ImportReport {
    let mut report = ImportReport {
        files: 1,
        ..ImportReport::default()
    };

    match format {
        SourceFormat::Lrc => {
            let parsed = lrc::parse(content);
            let raw = RawSong {
                artist: parsed.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                title: parsed.title.unwrap_or_else(|| default_title.to_string()),
                lyric: parsed.lyric,
            };
            report.accept(source.to_string(), raw);
        }
        SourceFormat::Txt => {
            for (index, block) in txt::parse(content).into_iter().enumerate() {
                let record = format!("{source}#{}", index + 1);
                match block {
                    Ok(raw) => report.accept(record, raw),
                    Err(reason) => report.fail(record, reason),
                }
            }
        }
        SourceFormat::Json => match json::parse(content) {
            Ok(records) => {
                for (index, record) in records.into_iter().enumerate() {
                    let name = format!("{source}#{}", index + 1);
                    match record {
                        Ok(raw) => report.accept(name, raw),
                        Err(reason) => report.fail(name, reason),
                    }
                }
            }
            Err(e) => report.fail(source, ImportError::json(source, e)),
        },
    }

    report
}

/// The file stem with characters unsafe in file names removed.
fn default_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    UNSAFE_FILENAME_CHARS.replace_all(&stem, "").trim().to_string()
}
