use anyhow::{bail, Context, Result};
use verso_analysis::Analyzer;
use verso_core::model::{Catalog, Song, SongId};
use verso_core::style::StyleDictionary;
use verso_etl::{load_library, save_library, Config};

/// Everything a command needs, loaded on demand from the configuration.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn catalog(&self) -> Result<Catalog> {
        load_library(&self.config.library_path).with_context(|| {
            format!(
                "Failed to load library {}",
                self.config.library_path.display()
            )
        })
    }

    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        save_library(&self.config.library_path, catalog).with_context(|| {
            format!(
                "Failed to save library {}",
                self.config.library_path.display()
            )
        })
    }

    pub fn analyzer(&self) -> Result<Analyzer> {
        let path = &self.config.style_dict_path;
        let styles = StyleDictionary::load(path).with_context(|| {
            format!(
                "Failed to load style dictionary {}\n\nPass --styles or set style_dict_path in {}",
                path.display(),
                verso_etl::config::config_file_path().display()
            )
        })?;
        Ok(Analyzer::with_kind(styles, self.config.tokenizer))
    }
}

/// Resolve a full song id or a unique prefix of one.
pub fn find_song<'c>(catalog: &'c Catalog, key: &str) -> Result<&'c Song> {
    if let Ok(id) = key.parse::<SongId>() {
        if let Some(song) = catalog.get(id) {
            return Ok(song);
        }
    }

    let key = key.trim().to_lowercase();
    if key.is_empty() {
        bail!("Empty song id");
    }
    let mut matches = catalog
        .iter()
        .filter(|s| s.id().to_string().starts_with(&key));
    match (matches.next(), matches.next()) {
        (Some(song), None) => Ok(song),
        (None, _) => bail!("No song with id {key}"),
        (Some(_), Some(_)) => bail!("Id prefix {key} matches more than one song"),
    }
}

/// First eight characters of an id, enough to tell songs apart in listings.
pub fn short_id(id: SongId) -> String {
    id.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(Song::new("A", "one", "la").unwrap()).unwrap();
        catalog.add(Song::new("B", "two", "da").unwrap()).unwrap();
        catalog
    }

    #[test]
    fn test_find_by_full_id_and_prefix() {
        let catalog = catalog();
        let song = &catalog.songs()[1];
        let full = song.id().to_string();

        assert_eq!(find_song(&catalog, &full).unwrap().title(), "two");
        assert_eq!(find_song(&catalog, &full[..12]).unwrap().title(), "two");
    }

    #[test]
    fn test_find_unknown_or_empty() {
        let catalog = catalog();
        assert!(find_song(&catalog, "zzzz").is_err());
        assert!(find_song(&catalog, "").is_err());
    }

    #[test]
    fn test_short_id() {
        let id = SongId::new();
        assert_eq!(short_id(id).len(), 8);
        assert!(id.to_string().starts_with(&short_id(id)));
    }
}
