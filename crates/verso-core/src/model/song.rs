use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ids::SongId;

/// Maximum length of an artist name or song title, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of a lyric, in characters.
pub const MAX_LYRIC_CHARS: usize = 10_000;

/// A song in the catalog.
///
/// Every `Song` has passed validation: artist and title are non-blank and at
/// most [`MAX_NAME_CHARS`] characters, the lyric is non-blank and at most
/// [`MAX_LYRIC_CHARS`] characters. Fields are only reachable through
/// accessors so an edit cannot bypass those bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SongRecord")]
pub struct Song {
    id: SongId,
    artist: String,
    title: String,
    lyric: String,
    import_time: DateTime<Utc>,
}

impl Song {
    /// Create a new song with a fresh id, stamped with the current time.
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        lyric: impl Into<String>,
    ) -> Result<Self> {
        let artist = artist.into();
        let title = title.into();
        let lyric = lyric.into();
        validate(&artist, &title, &lyric)?;
        Ok(Self {
            id: SongId::new(),
            artist,
            title,
            lyric,
            import_time: Utc::now(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> SongId {
        self.id
    }

    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn lyric(&self) -> &str {
        &self.lyric
    }

    #[must_use]
    pub const fn import_time(&self) -> DateTime<Utc> {
        self.import_time
    }

    /// Apply an edit. The song is left untouched if the result would be invalid.
    pub fn apply(&mut self, edit: SongEdit) -> Result<()> {
        let artist = edit.artist.unwrap_or_else(|| self.artist.clone());
        let title = edit.title.unwrap_or_else(|| self.title.clone());
        let lyric = edit.lyric.unwrap_or_else(|| self.lyric.clone());
        validate(&artist, &title, &lyric)?;
        self.artist = artist;
        self.title = title;
        self.lyric = lyric;
        Ok(())
    }
}

/// A partial update to a song's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongEdit {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub lyric: Option<String>,
}

impl SongEdit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.title.is_none() && self.lyric.is_none()
    }
}

/// The unvalidated wire shape of a song.
///
/// Imported files and library backups may omit `id` and `import_time`;
/// those songs get fresh values on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRecord {
    #[serde(default)]
    pub id: Option<SongId>,
    pub artist: String,
    pub title: String,
    pub lyric: String,
    #[serde(default)]
    pub import_time: Option<DateTime<Utc>>,
}

impl TryFrom<SongRecord> for Song {
    type Error = Error;

    fn try_from(record: SongRecord) -> Result<Self> {
        validate(&record.artist, &record.title, &record.lyric)?;
        Ok(Self {
            id: record.id.unwrap_or_default(),
            artist: record.artist,
            title: record.title,
            lyric: record.lyric,
            import_time: record.import_time.unwrap_or_else(Utc::now),
        })
    }
}

fn validate(artist: &str, title: &str, lyric: &str) -> Result<()> {
    check_field("artist", artist, MAX_NAME_CHARS)?;
    check_field("title", title, MAX_NAME_CHARS)?;
    check_field("lyric", lyric, MAX_LYRIC_CHARS)
}

fn check_field(field: &'static str, value: &str, max_chars: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    let len = value.chars().count();
    if len > max_chars {
        return Err(Error::Validation {
            field,
            reason: format!("{len} characters exceeds the limit of {max_chars}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_new() {
        let song = Song::new("周杰伦", "晴天", "故事的小黄花").unwrap();
        assert_eq!(song.artist(), "周杰伦");
        assert_eq!(song.title(), "晴天");
        assert_eq!(song.lyric(), "故事的小黄花");
    }

    #[test]
    fn test_song_rejects_blank_fields() {
        let err = Song::new("  ", "title", "lyric").unwrap_err();
        assert!(matches!(err, Error::Validation { field: "artist", .. }));

        let err = Song::new("artist", "title", "\n\t").unwrap_err();
        assert!(matches!(err, Error::Validation { field: "lyric", .. }));
    }

    #[test]
    fn test_song_length_bounds_count_characters() {
        // 100 CJK characters are 300 bytes but still within bounds.
        let title = "晴".repeat(MAX_NAME_CHARS);
        assert!(Song::new("artist", title, "lyric").is_ok());

        let title = "晴".repeat(MAX_NAME_CHARS + 1);
        let err = Song::new("artist", title, "lyric").unwrap_err();
        assert!(matches!(err, Error::Validation { field: "title", .. }));

        let lyric = "a".repeat(MAX_LYRIC_CHARS + 1);
        assert!(Song::new("artist", "title", lyric).is_err());
    }

    #[test]
    fn test_song_apply_edit() {
        let mut song = Song::new("artist", "title", "old lyric").unwrap();
        let id = song.id();
        song.apply(SongEdit {
            lyric: Some("new lyric".to_string()),
            ..SongEdit::default()
        })
        .unwrap();
        assert_eq!(song.lyric(), "new lyric");
        assert_eq!(song.title(), "title");
        assert_eq!(song.id(), id);
    }

    #[test]
    fn test_song_invalid_edit_leaves_song_untouched() {
        let mut song = Song::new("artist", "title", "lyric").unwrap();
        let result = song.apply(SongEdit {
            title: Some("new title".to_string()),
            artist: Some(String::new()),
            ..SongEdit::default()
        });
        assert!(result.is_err());
        assert_eq!(song.title(), "title");
        assert_eq!(song.artist(), "artist");
    }

    #[test]
    fn test_song_deserialize_fills_missing_id_and_time() {
        let song: Song =
            serde_json::from_str(r#"{"artist": "a", "title": "t", "lyric": "l"}"#).unwrap();
        assert_eq!(song.artist(), "a");
    }

    #[test]
    fn test_song_deserialize_validates() {
        let result: std::result::Result<Song, _> =
            serde_json::from_str(r#"{"artist": "", "title": "t", "lyric": "l"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_song_serde_round_trip_keeps_identity() {
        let song = Song::new("a", "t", "l").unwrap();
        let json = serde_json::to_string(&song).unwrap();
        let back: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(back, song);
    }
}
