//! Per-artist summaries and the catalog-wide style census.

use serde::Serialize;

use verso_core::style::StyleDictionary;
use verso_core::text::Tokenizer;

use crate::classify::{classify, StyleAnalysis, StyleDistribution};
use crate::keywords::{extract_keywords, most_common};

/// Primary style of an artist with no style signal.
pub const UNKNOWN_STYLE: &str = "unknown";

/// Secondary style when there is no second style with signal.
pub const NO_STYLE: &str = "none";

const KEYWORDS_PER_SONG: usize = 10;
const KEYWORDS_PER_ARTIST: usize = 20;

/// Aggregated view of one artist's lyrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub artist: String,
    /// Mean style share over the artist's songs, as a percentage.
    pub style_distribution: StyleDistribution,
    pub primary_style: String,
    pub secondary_style: String,
    /// Sample standard deviation of the nonzero percentages.
    pub style_diversity: f64,
    pub top_keywords: Vec<(String, usize)>,
    /// Songs with a non-blank lyric.
    pub song_count: usize,
}

/// Summarize every artist in `artist_to_lyrics`, keeping its order.
///
/// Blank lyrics are skipped. Each remaining lyric is classified and gets its
/// own single-document keyword batch.
pub fn artist_statistics(
    artist_to_lyrics: &[(String, Vec<String>)],
    styles: &StyleDictionary,
    tokenizer: &dyn Tokenizer,
) -> Vec<ArtistSummary> {
    artist_to_lyrics
        .iter()
        .map(|(artist, lyrics)| {
            log::debug!("Summarizing {} lyrics for {}", lyrics.len(), artist);
            summarize(artist, lyrics, styles, tokenizer)
        })
        .collect()
}

fn summarize(
    artist: &str,
    lyrics: &[String],
    styles: &StyleDictionary,
    tokenizer: &dyn Tokenizer,
) -> ArtistSummary {
    let lyrics: Vec<&str> = lyrics
        .iter()
        .map(String::as_str)
        .filter(|l| !l.trim().is_empty())
        .collect();

    let analyses: Vec<StyleAnalysis> = lyrics
        .iter()
        .map(|lyric| classify(lyric, styles, tokenizer))
        .collect();

    let keywords = lyrics.iter().flat_map(|lyric| {
        extract_keywords(&[lyric], KEYWORDS_PER_SONG, tokenizer)
            .into_iter()
            .flatten()
    });
    let top_keywords = most_common(keywords, KEYWORDS_PER_ARTIST);

    let style_distribution = mean_percentages(&analyses, styles);
    let (primary_style, secondary_style) = leading_styles(&style_distribution);

    let nonzero: Vec<f64> = style_distribution
        .iter()
        .map(|s| s.score)
        .filter(|&v| v > 0.0)
        .collect();
    let style_diversity = if analyses.len() > 1 && nonzero.len() > 1 {
        round2(sample_stdev(&nonzero))
    } else {
        0.0
    };

    ArtistSummary {
        artist: artist.to_string(),
        style_distribution,
        primary_style,
        secondary_style,
        style_diversity,
        top_keywords,
        song_count: analyses.len(),
    }
}

fn mean_percentages(analyses: &[StyleAnalysis], styles: &StyleDictionary) -> StyleDistribution {
    if analyses.is_empty() {
        return StyleDistribution::zeros(styles);
    }
    let count = analyses.len() as f64;
    StyleDistribution::from_scores(styles.names().map(|name| {
        let sum: f64 = analyses
            .iter()
            .filter_map(|a| a.distribution.get(name))
            .sum();
        (name, round2(sum / count * 100.0))
    }))
}

fn leading_styles(distribution: &StyleDistribution) -> (String, String) {
    let mut ranked: Vec<_> = distribution.iter().collect();
    // Stable: equal percentages keep dictionary order.
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let primary = match ranked.first() {
        Some(s) if s.score > 0.0 => s.style.clone(),
        _ => UNKNOWN_STYLE.to_string(),
    };
    let secondary = match ranked.get(1) {
        Some(s) if s.score > 0.0 => s.style.clone(),
        _ => NO_STYLE.to_string(),
    };
    (primary, secondary)
}

fn sample_stdev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count songs per primary style, most frequent first.
///
/// Equal counts keep dictionary order; styles no song leads are omitted, as
/// are primary styles the dictionary does not declare.
pub fn style_census<'a, I>(analyses: I, styles: &StyleDictionary) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a StyleAnalysis>,
{
    let mut counts: Vec<(String, usize)> = styles.names().map(|n| (n.to_string(), 0)).collect();
    for analysis in analyses {
        if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == analysis.primary_style) {
            entry.1 += 1;
        }
    }
    counts.retain(|(_, c)| *c > 0);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use verso_core::style::Style;
    use verso_core::text::UnicodeWordTokenizer;

    fn happy_sad() -> StyleDictionary {
        StyleDictionary::new(vec![
            Style::new("happy", ["joy", "sun"]),
            Style::new("sad", ["rain", "tears"]),
        ])
        .unwrap()
    }

    fn one_artist(lyrics: &[&str]) -> Vec<(String, Vec<String>)> {
        vec![("X".to_string(), lyrics.iter().map(|l| l.to_string()).collect())]
    }

    #[test]
    fn test_blank_lyrics_give_sentinels() {
        let stats = artist_statistics(&one_artist(&["", " "]), &happy_sad(), &UnicodeWordTokenizer);
        let summary = &stats[0];
        assert!(summary.style_distribution.is_zero());
        assert_eq!(summary.style_distribution.len(), 2);
        assert_eq!(summary.primary_style, UNKNOWN_STYLE);
        assert_eq!(summary.secondary_style, NO_STYLE);
        assert_eq!(summary.style_diversity, 0.0);
        assert!(summary.top_keywords.is_empty());
        assert_eq!(summary.song_count, 0);
    }

    #[test]
    fn test_single_pure_song() {
        let stats = artist_statistics(&one_artist(&["joy joy sun sun"]), &happy_sad(), &UnicodeWordTokenizer);
        let summary = &stats[0];
        assert_eq!(summary.style_distribution.get("happy"), Some(100.0));
        assert_eq!(summary.style_distribution.get("sad"), Some(0.0));
        assert_eq!(summary.primary_style, "happy");
        assert_eq!(summary.secondary_style, NO_STYLE);
        assert_eq!(summary.style_diversity, 0.0);
        assert_eq!(summary.song_count, 1);
    }

    #[test]
    fn test_mean_over_songs() {
        let stats = artist_statistics(
            &one_artist(&["joy sun", "rain tears", "joy"]),
            &happy_sad(),
            &UnicodeWordTokenizer,
        );
        let summary = &stats[0];
        assert_eq!(summary.style_distribution.get("happy"), Some(66.67));
        assert_eq!(summary.style_distribution.get("sad"), Some(33.33));
        assert_eq!(summary.primary_style, "happy");
        assert_eq!(summary.secondary_style, "sad");
        // stdev of [66.67, 33.33]
        assert!((summary.style_diversity - 23.57).abs() < 1e-9);
    }

    #[test]
    fn test_equal_percentages_keep_dictionary_order() {
        let stats = artist_statistics(&one_artist(&["joy", "rain"]), &happy_sad(), &UnicodeWordTokenizer);
        let summary = &stats[0];
        assert_eq!(summary.primary_style, "happy");
        assert_eq!(summary.secondary_style, "sad");
        assert_eq!(summary.style_diversity, 0.0);
    }

    #[test]
    fn test_top_keywords_count_across_songs() {
        let stats = artist_statistics(
            &one_artist(&["moon river", "moon light", "moon"]),
            &happy_sad(),
            &UnicodeWordTokenizer,
        );
        let summary = &stats[0];
        assert_eq!(summary.top_keywords[0], ("moon".to_string(), 3));
        assert_eq!(summary.top_keywords.len(), 3);
    }

    #[test]
    fn test_every_artist_is_summarized() {
        let mut map = one_artist(&["joy"]);
        map.push(("Y".to_string(), vec![]));
        let stats = artist_statistics(&map, &happy_sad(), &UnicodeWordTokenizer);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].artist, "Y");
        assert_eq!(stats[1].primary_style, UNKNOWN_STYLE);
    }

    #[test]
    fn test_artists_keep_input_order() {
        let map = vec![
            ("周杰伦".to_string(), vec!["joy".to_string()]),
            ("Adele".to_string(), vec!["rain".to_string()]),
            ("许巍".to_string(), vec!["sun".to_string()]),
        ];
        let stats = artist_statistics(&map, &happy_sad(), &UnicodeWordTokenizer);
        let artists: Vec<&str> = stats.iter().map(|s| s.artist.as_str()).collect();
        assert_eq!(artists, vec!["周杰伦", "Adele", "许巍"]);
    }

    #[test]
    fn test_style_census_orders_by_count() {
        let styles = happy_sad();
        let analyses: Vec<StyleAnalysis> = ["rain", "tears rain", "joy"]
            .iter()
            .map(|l| classify(l, &styles, &UnicodeWordTokenizer))
            .collect();
        let census = style_census(&analyses, &styles);
        assert_eq!(census, vec![("sad".to_string(), 2), ("happy".to_string(), 1)]);
    }

    #[test]
    fn test_style_census_omits_empty_styles() {
        let styles = happy_sad();
        let analyses = vec![classify("sun", &styles, &UnicodeWordTokenizer)];
        assert_eq!(style_census(&analyses, &styles), vec![("happy".to_string(), 1)]);
        assert!(style_census(&Vec::<StyleAnalysis>::new(), &styles).is_empty());
    }
}
