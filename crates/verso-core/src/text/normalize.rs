//! Lyric text normalization.
//!
//! Raw lyrics, especially those taken from LRC files, carry structural
//! noise: credit lines (lyricist, composer, producer), the artist's own
//! name, `[mm:ss.xx]` timestamps, and punctuation. All of it would end up
//! as vocabulary in the vector space. [`clean_lyrics`] removes it and
//! leaves whitespace-separated linguistic text.

use regex::Regex;
use std::sync::LazyLock;

/// Lines containing any of these markers are credits or metadata, not lyrics.
///
/// A hyphen marks `title-artist` header lines and ASCII brackets mark
/// version notes such as `(Live版)`; lines using either are dropped whole.
pub const CREDIT_MARKERS: &[&str] = &[
    "作词",
    "作曲",
    "-",
    "(Live)",
    "(",
    ")",
    "编曲",
    "录音室",
    "录音",
    "混音",
    "制作",
    "监制",
    "演唱",
    "歌手",
    "Artist",
    "纯音乐",
    "无歌词",
    "Instrumental",
];

// Constant patterns; unwrap cannot fail.
#[allow(clippy::unwrap_used)]
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d{2,}:\d{2}(?:[.:]\d+)?\]").unwrap());

#[allow(clippy::unwrap_used)]
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

#[allow(clippy::unwrap_used)]
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip credits, timestamps, and punctuation from a lyric.
///
/// When `artist` is given, lines mentioning the artist are dropped as well.
/// Returns an empty string when nothing linguistic remains.
pub fn clean_lyrics(text: &str, artist: Option<&str>) -> String {
    let artist = artist.map(str::trim).filter(|a| !a.is_empty());

    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !CREDIT_MARKERS.iter().any(|marker| line.contains(marker)))
        .filter(|line| artist.map_or(true, |a| !line.contains(a)))
        .collect();

    if kept.is_empty() {
        return String::new();
    }

    let joined = kept.join("\n");
    let without_timestamps = TIMESTAMP.replace_all(&joined, "");
    let without_punctuation = NON_WORD.replace_all(&without_timestamps, " ");
    WHITESPACE
        .replace_all(&without_punctuation, " ")
        .trim()
        .to_string()
}
