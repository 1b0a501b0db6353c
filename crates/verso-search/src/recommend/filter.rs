use verso_core::model::Song;
use verso_core::style::StyleLabels;

/// Catalog filtering shared by query mode and random pick.
///
/// Every set criterion must hold. A song without a style label fails any
/// style criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    /// The song's label must equal this style.
    pub style: Option<String>,
    /// The artist field must contain this substring.
    pub artist_contains: Option<String>,
    /// The artist must be one of these, exactly. Empty means any artist.
    pub artists: Vec<String>,
    /// The label must be one of these. Empty means any style.
    pub styles: Vec<String>,
}

impl SongFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.style.is_none()
            && self.artist_contains.is_none()
            && self.artists.is_empty()
            && self.styles.is_empty()
    }

    pub fn matches(&self, song: &Song, labels: &dyn StyleLabels) -> bool {
        let label = labels.style_of(song.id());

        if let Some(style) = &self.style {
            if label != Some(style.as_str()) {
                return false;
            }
        }
        if let Some(artist) = &self.artist_contains {
            if !song.artist().contains(artist.as_str()) {
                return false;
            }
        }
        if !self.artists.is_empty() && !self.artists.iter().any(|a| a == song.artist()) {
            return false;
        }
        if !self.styles.is_empty() && !label.is_some_and(|l| self.styles.iter().any(|s| s == l)) {
            return false;
        }
        true
    }

    /// The songs of `catalog` that pass, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a [Song], labels: &dyn StyleLabels) -> Vec<&'a Song> {
        catalog.iter().filter(|s| self.matches(s, labels)).collect()
    }
}
