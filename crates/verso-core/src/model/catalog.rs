use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::ids::SongId;
use crate::model::song::{Song, SongEdit};

/// The ordered song collection.
///
/// Insertion order is significant: recommendation ties are broken by
/// catalog order. Song ids are unique within a catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Song>")]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from songs, rejecting duplicate ids.
    pub fn from_songs(songs: Vec<Song>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(songs.len());
        for song in &songs {
            if !seen.insert(song.id()) {
                return Err(Error::InvalidData(format!(
                    "duplicate song id {}",
                    song.id()
                )));
            }
        }
        Ok(Self { songs })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.songs.iter()
    }

    #[must_use]
    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.songs.iter().find(|s| s.id() == id)
    }

    /// Append a song, returning its id.
    pub fn add(&mut self, song: Song) -> Result<SongId> {
        let id = song.id();
        if self.get(id).is_some() {
            return Err(Error::InvalidData(format!("duplicate song id {id}")));
        }
        self.songs.push(song);
        Ok(id)
    }

    /// Edit a song in place.
    ///
    /// Callers holding cached analysis for this song must invalidate it.
    pub fn edit(&mut self, id: SongId, edit: SongEdit) -> Result<&Song> {
        let song = self
            .songs
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;
        song.apply(edit)?;
        Ok(song)
    }

    /// Remove a song, returning it.
    pub fn remove(&mut self, id: SongId) -> Result<Song> {
        let index = self
            .songs
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.songs.remove(index))
    }

    /// Case-insensitive substring search over artist, title, and lyric.
    ///
    /// A blank term matches every song.
    pub fn search(&self, term: &str) -> Vec<&Song> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.songs.iter().collect();
        }
        self.songs
            .iter()
            .filter(|s| {
                [s.artist(), s.title(), s.lyric()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Distinct artist names in first-seen order.
    pub fn artists(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.songs
            .iter()
            .map(Song::artist)
            .filter(|artist| seen.insert(*artist))
            .collect()
    }

    /// Group lyrics by artist. Artists come in first-seen order, and each
    /// artist's lyrics in catalog order.
    pub fn lyrics_by_artist(&self) -> Vec<(String, Vec<String>)> {
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for song in &self.songs {
            let slot = *index.entry(song.artist()).or_insert_with(|| {
                grouped.push((song.artist().to_string(), Vec::new()));
                grouped.len() - 1
            });
            grouped[slot].1.push(song.lyric().to_string());
        }
        grouped
    }
}

impl TryFrom<Vec<Song>> for Catalog {
    type Error = Error;

    fn try_from(songs: Vec<Song>) -> Result<Self> {
        Self::from_songs(songs)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.songs)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

fn not_found(id: SongId) -> Error {
    Error::NotFound {
        entity: "song",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add(Song::new("周杰伦", "晴天", "故事的小黄花 从出生那年就飘着").unwrap())
            .unwrap();
        catalog
            .add(Song::new("Adele", "Hello", "Hello from the other side").unwrap())
            .unwrap();
        catalog
            .add(Song::new("周杰伦", "稻香", "还记得你说家是唯一的城堡").unwrap())
            .unwrap();
        catalog
    }

    #[test]
    fn test_catalog_add_and_get() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        let first = &catalog.songs()[0];
        assert_eq!(catalog.get(first.id()).unwrap().title(), "晴天");
    }

    #[test]
    fn test_catalog_rejects_duplicate_id() {
        let mut catalog = sample();
        let dup = catalog.songs()[0].clone();
        assert!(catalog.add(dup).is_err());
    }

    #[test]
    fn test_catalog_edit() {
        let mut catalog = sample();
        let id = catalog.songs()[1].id();
        let song = catalog
            .edit(
                id,
                SongEdit {
                    title: Some("Hello (Live)".to_string()),
                    ..SongEdit::default()
                },
            )
            .unwrap();
        assert_eq!(song.title(), "Hello (Live)");
    }

    #[test]
    fn test_catalog_remove_unknown_is_not_found() {
        let mut catalog = sample();
        let err = catalog.remove(SongId::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "song", .. }));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_remove() {
        let mut catalog = sample();
        let id = catalog.songs()[0].id();
        let removed = catalog.remove(id).unwrap();
        assert_eq!(removed.title(), "晴天");
        assert!(catalog.get(id).is_none());
    }

    #[test]
    fn test_catalog_search_is_case_insensitive() {
        let catalog = sample();
        let hits = catalog.search("HELLO");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].artist(), "Adele");

        let hits = catalog.search("城堡");
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.search("  ").len(), 3);
    }

    #[test]
    fn test_catalog_artists_first_seen_order() {
        let catalog = sample();
        assert_eq!(catalog.artists(), vec!["周杰伦", "Adele"]);
    }

    #[test]
    fn test_catalog_lyrics_by_artist() {
        let catalog = sample();
        let grouped = catalog.lyrics_by_artist();
        let artists: Vec<&str> = grouped.iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(artists, catalog.artists());
        assert_eq!(grouped[0].1.len(), 2);
        assert!(grouped[0].1[0].starts_with("故事"));
    }

    #[test]
    fn test_catalog_serde_rejects_duplicate_ids() {
        let catalog = sample();
        let mut songs: Vec<serde_json::Value> =
            serde_json::from_str(&serde_json::to_string(&catalog).unwrap()).unwrap();
        songs.push(songs[0].clone());
        let json = serde_json::to_string(&songs).unwrap();
        assert!(serde_json::from_str::<Catalog>(&json).is_err());
    }

    #[test]
    fn test_catalog_serde_round_trip() {
        let catalog = sample();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
