use std::fmt;

use verso_core::model::{Catalog, Song};
use verso_core::style::StyleDictionary;
use verso_core::text::{clean_lyrics, Tokenizer, TokenizerKind};
use verso_search::{parse_query, recommend, similar_songs, Recommendation};

use crate::cache::AnalysisCache;
use crate::classify::{classify, classify_cached, StyleAnalysis};
use crate::keywords::{extract_keywords, word_frequency};
use crate::stats::{artist_statistics, style_census, ArtistSummary};

/// A style dictionary paired with a tokenizer.
///
/// Song-level operations clean the lyric (credits, timestamps, the artist's
/// own name) before analysing it, and memoize per-song results in the
/// caller's [`AnalysisCache`].
pub struct Analyzer {
    styles: StyleDictionary,
    tokenizer: Box<dyn Tokenizer>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("styles", &self.styles.len())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    #[must_use]
    pub fn new(styles: StyleDictionary, tokenizer: Box<dyn Tokenizer>) -> Self {
        Self { styles, tokenizer }
    }

    #[must_use]
    pub fn with_kind(styles: StyleDictionary, kind: TokenizerKind) -> Self {
        log::debug!("Using {} tokenizer", kind);
        Self::new(styles, kind.build())
    }

    #[must_use]
    pub fn styles(&self) -> &StyleDictionary {
        &self.styles
    }

    #[must_use]
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Classify free text as given.
    #[must_use]
    pub fn classify_text(&self, text: &str) -> StyleAnalysis {
        classify(text, &self.styles, self.tokenizer())
    }

    /// Classify a song's cleaned lyric, reusing a cached result.
    pub fn classify_song<'c>(&self, song: &Song, cache: &'c mut AnalysisCache) -> &'c StyleAnalysis {
        cache.analysis_or_insert_with(song.id(), |spaces| {
            classify_cached(&clean(song), &self.styles, self.tokenizer(), spaces)
        })
    }

    /// Make sure every song in `catalog` has a cached analysis.
    pub fn label_catalog(&self, catalog: &[Song], cache: &mut AnalysisCache) {
        let mut fresh = 0usize;
        for song in catalog {
            if cache.analysis(song.id()).is_none() {
                self.classify_song(song, cache);
                fresh += 1;
            }
        }
        log::debug!("Labelled {} of {} songs", fresh, catalog.len());
    }

    /// Keywords of one song's cleaned lyric in a batch of its own.
    pub fn song_keywords(&self, song: &Song, top_k: usize, cache: &mut AnalysisCache) -> Vec<String> {
        if let Some(words) = cache.keywords(song.id(), top_k) {
            return words.to_vec();
        }
        let words = extract_keywords(&[clean(song)], top_k, self.tokenizer())
            .into_iter()
            .next()
            .unwrap_or_default();
        cache.insert_keywords(song.id(), top_k, words.clone());
        words
    }

    /// Keywords of several songs weighed against each other in one batch.
    #[must_use]
    pub fn batch_keywords(&self, songs: &[&Song], top_k: usize) -> Vec<Vec<String>> {
        let texts: Vec<String> = songs.iter().map(|s| clean(s)).collect();
        extract_keywords(&texts, top_k, self.tokenizer())
    }

    #[must_use]
    pub fn word_frequency(&self, song: &Song, top_n: usize) -> Vec<(String, usize)> {
        word_frequency(&clean(song), self.tokenizer(), top_n)
    }

    /// Summaries for every artist in the catalog, over cleaned lyrics.
    #[must_use]
    pub fn artist_statistics(&self, catalog: &Catalog) -> Vec<ArtistSummary> {
        let cleaned: Vec<(String, Vec<String>)> = catalog
            .lyrics_by_artist()
            .into_iter()
            .map(|(artist, lyrics)| {
                let lyrics = lyrics
                    .iter()
                    .map(|l| clean_lyrics(l, Some(&artist)))
                    .collect();
                (artist, lyrics)
            })
            .collect();
        artist_statistics(&cleaned, &self.styles, self.tokenizer())
    }

    pub fn style_census(&self, catalog: &[Song], cache: &mut AnalysisCache) -> Vec<(String, usize)> {
        self.label_catalog(catalog, cache);
        let analyses = catalog.iter().filter_map(|s| cache.analysis(s.id()));
        style_census(analyses, &self.styles)
    }

    /// Songs most like `base`; labels the catalog first when style counts.
    pub fn similar<'a>(
        &self,
        base: &Song,
        catalog: &'a [Song],
        n: usize,
        consider_style: bool,
        cache: &mut AnalysisCache,
    ) -> Vec<Recommendation<'a>> {
        if consider_style {
            self.label_catalog(catalog, cache);
        }
        similar_songs(base, catalog, n, consider_style, &*cache, self.tokenizer())
    }

    /// Songs for a free-text request; labels the catalog first when the
    /// request names a style.
    pub fn recommend<'a>(
        &self,
        catalog: &'a [Song],
        query: &str,
        cache: &mut AnalysisCache,
    ) -> Vec<Recommendation<'a>> {
        if parse_query(query, &self.styles).style.is_some() {
            self.label_catalog(catalog, cache);
        }
        recommend(catalog, query, &self.styles, &*cache, self.tokenizer())
    }
}

fn clean(song: &Song) -> String {
    clean_lyrics(song.lyric(), Some(song.artist()))
}
