//! Caller-owned memo of per-song analysis results.

use std::collections::HashMap;

use verso_core::model::SongId;
use verso_core::style::StyleLabels;
use verso_search::SpaceCache;

use crate::classify::StyleAnalysis;

/// Style analyses and keyword lists keyed by song, plus a bounded set of the
/// vector spaces built while classifying.
///
/// Entries go stale when a song's lyric changes; call [`invalidate`] after
/// editing or removing a song. Spaces are keyed by content, so a stale one is
/// never hit again and ages out of the bounded space cache.
///
/// [`invalidate`]: AnalysisCache::invalidate
#[derive(Debug, Default)]
pub struct AnalysisCache {
    styles: HashMap<SongId, StyleAnalysis>,
    keywords: HashMap<SongId, (usize, Vec<String>)>,
    spaces: SpaceCache,
}

impl AnalysisCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache keeping at most `capacity` vector spaces.
    #[must_use]
    pub fn with_space_capacity(capacity: usize) -> Self {
        Self {
            spaces: SpaceCache::with_capacity(capacity),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn analysis(&self, id: SongId) -> Option<&StyleAnalysis> {
        self.styles.get(&id)
    }

    pub fn insert_analysis(&mut self, id: SongId, analysis: StyleAnalysis) {
        self.styles.insert(id, analysis);
    }

    /// Cached keywords for `id`, if they were extracted with the same `top_k`.
    #[must_use]
    pub fn keywords(&self, id: SongId, top_k: usize) -> Option<&[String]> {
        self.keywords
            .get(&id)
            .filter(|(k, _)| *k == top_k)
            .map(|(_, words)| words.as_slice())
    }

    pub fn insert_keywords(&mut self, id: SongId, top_k: usize, keywords: Vec<String>) {
        self.keywords.insert(id, (top_k, keywords));
    }

    /// The cached analysis for `id`, computing it with the space cache on a miss.
    pub(crate) fn analysis_or_insert_with<F>(&mut self, id: SongId, compute: F) -> &StyleAnalysis
    where
        F: FnOnce(&mut SpaceCache) -> StyleAnalysis,
    {
        let Self { styles, spaces, .. } = self;
        styles.entry(id).or_insert_with(|| compute(spaces))
    }

    #[must_use]
    pub fn spaces(&self) -> &SpaceCache {
        &self.spaces
    }

    /// Drop everything cached for `id`.
    pub fn invalidate(&mut self, id: SongId) {
        let had_style = self.styles.remove(&id).is_some();
        let had_keywords = self.keywords.remove(&id).is_some();
        if had_style || had_keywords {
            log::debug!("Invalidated cached analysis for {}", id);
        }
    }

    pub fn clear(&mut self) {
        self.styles.clear();
        self.keywords.clear();
        self.spaces.clear();
    }

    /// Number of songs with a cached style analysis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.keywords.is_empty()
    }
}

impl StyleLabels for AnalysisCache {
    fn style_of(&self, id: SongId) -> Option<&str> {
        self.styles.get(&id).map(|a| a.primary_style.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StyleDistribution;

    fn analysis(style: &str) -> StyleAnalysis {
        StyleAnalysis {
            primary_style: style.to_string(),
            distribution: StyleDistribution::default(),
            raw_scores: StyleDistribution::default(),
        }
    }

    #[test]
    fn test_cache_is_a_label_source() {
        let id = SongId::new();
        let mut cache = AnalysisCache::new();
        assert_eq!(cache.style_of(id), None);
        cache.insert_analysis(id, analysis("rock"));
        assert_eq!(cache.style_of(id), Some("rock"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keywords_keyed_by_top_k() {
        let id = SongId::new();
        let mut cache = AnalysisCache::new();
        cache.insert_keywords(id, 5, vec!["moon".to_string()]);
        assert_eq!(cache.keywords(id, 5), Some(&["moon".to_string()][..]));
        assert_eq!(cache.keywords(id, 10), None);
    }

    #[test]
    fn test_invalidate_drops_both_entries() {
        let id = SongId::new();
        let other = SongId::new();
        let mut cache = AnalysisCache::new();
        cache.insert_analysis(id, analysis("rock"));
        cache.insert_keywords(id, 5, vec![]);
        cache.insert_analysis(other, analysis("folk"));

        cache.invalidate(id);
        assert!(cache.analysis(id).is_none());
        assert!(cache.keywords(id, 5).is_none());
        assert_eq!(cache.style_of(other), Some("folk"));

        cache.clear();
        assert!(cache.is_empty());
    }
}
