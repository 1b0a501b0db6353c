use regex::Regex;
use std::sync::LazyLock;

use verso_core::model::Song;
use verso_core::style::{StyleDictionary, StyleLabels};
use verso_core::text::Tokenizer;

use super::{rank, Recommendation, SongFilter};
use crate::vector::VectorSpace;

/// Query mode never returns more than this many songs.
pub const MAX_QUERY_RESULTS: usize = 10;

/// Marker that follows an artist name in a request: "X的歌", the songs of X.
const ARTIST_MARKER: &str = "的歌";

// Constant patterns; unwrap cannot fail.
#[allow(clippy::unwrap_used)]
static ARTIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)的歌").unwrap());

#[allow(clippy::unwrap_used)]
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,，、和与]+").unwrap());

/// A free-text request split into filters and keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub style: Option<String>,
    pub artist: Option<String>,
    pub keywords: Vec<String>,
}

impl ParsedQuery {
    #[must_use]
    pub fn filter(&self) -> SongFilter {
        SongFilter {
            style: self.style.clone(),
            artist_contains: self.artist.clone(),
            ..SongFilter::default()
        }
    }
}

/// Parse a request such as `"周杰伦的歌 中国风 雨"`.
///
/// The style is the first dictionary style whose name occurs in the query.
/// The artist is the word run directly before `的歌`. Whatever remains after
/// removing both is split on whitespace, commas, `、`, `和` and `与`.
pub fn parse_query(query: &str, styles: &StyleDictionary) -> ParsedQuery {
    let style = styles
        .names()
        .find(|name| query.contains(name))
        .map(String::from);

    let artist = ARTIST
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let mut remainder = query.to_string();
    if let Some(style) = &style {
        remainder = remainder.replace(style.as_str(), "");
    }
    if let Some(artist) = &artist {
        remainder = remainder.replace(&format!("{artist}{ARTIST_MARKER}"), "");
    }

    let keywords = SEPARATORS
        .split(&remainder)
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(String::from)
        .collect();

    ParsedQuery {
        style,
        artist,
        keywords,
    }
}

/// Recommend up to [`MAX_QUERY_RESULTS`] songs for a free-text request.
///
/// The catalog is filtered by the parsed style (against `labels`) and
/// artist; an empty pool yields no results. The pool's lyrics and the
/// joined keywords (or the raw query when there are none) share one vector
/// space, and songs are ranked by similarity to the query document.
pub fn recommend<'a>(
    catalog: &'a [Song],
    query: &str,
    styles: &StyleDictionary,
    labels: &dyn StyleLabels,
    tokenizer: &dyn Tokenizer,
) -> Vec<Recommendation<'a>> {
    let parsed = parse_query(query, styles);
    log::debug!("Parsed query {:?}: {:?}", query, parsed);

    let pool = parsed.filter().apply(catalog, labels);
    if pool.is_empty() {
        return Vec::new();
    }

    let query_document = if parsed.keywords.is_empty() {
        query.to_string()
    } else {
        parsed.keywords.join(" ")
    };

    let mut documents: Vec<&str> = pool.iter().map(|s| s.lyric()).collect();
    documents.push(&query_document);
    let space = VectorSpace::build(&documents, tokenizer);

    let results = pool
        .into_iter()
        .zip(space.similarities_to_last())
        .map(|(song, score)| Recommendation { song, score })
        .collect();

    rank(results, MAX_QUERY_RESULTS)
}
