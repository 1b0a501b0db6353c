//! LRC lyric files.
//!
//! Recognized line kinds:
//! - ID tags: `[ar:...]`, `[ti:...]`, `[artist:...]`, `[title:...]` (album
//!   and creator tags are consumed and ignored)
//! - timed lines: `[mm:ss.xx]text`, possibly with several timestamps
//! - `@key:value` and `【key:value` metadata lines
//! - plain text lines
//!
//! Credit lines are dropped; lyricist/composer credits are mined for an
//! artist when no tag names one.

/// Artist of an LRC file whose content names none.
pub const UNKNOWN_ARTIST: &str = "未知歌手";

/// Text marking a line as credits or production metadata.
const CREDIT_KEYWORDS: &[&str] = &[
    "作词",
    "作曲",
    "编曲",
    "制作人",
    "监制",
    "混音",
    "录音",
    "企划",
    "统筹",
    "出品",
    "发行",
    "歌词",
    "Lyrics",
    "Music",
    "Composer",
    "Arranger",
    "Producer",
    "Mixing",
    "Recording",
    "Mastering",
    "Label",
    "Copyright",
];

/// Credits whose value is taken as the artist when nothing else names one.
const ARTIST_CREDITS: &[&str] = &["作词", "作曲", "Lyrics", "Music"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Artist,
    Title,
    Ignored,
}

fn id_tag(name: &str) -> Option<Tag> {
    match name.to_lowercase().as_str() {
        "ar" | "artist" => Some(Tag::Artist),
        "ti" | "title" => Some(Tag::Title),
        "al" | "album" | "by" | "creator" => Some(Tag::Ignored),
        _ => None,
    }
}

/// What an LRC file says about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LrcSong {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub lyric: String,
}

pub(crate) fn parse(content: &str) -> LrcSong {
    let mut artist: Option<String> = None;
    let mut title: Option<String> = None;
    let mut lyrics: Vec<&str> = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('[') {
            if let Some((tag, value)) = split_id_tag(line) {
                match tag {
                    Tag::Artist if !value.is_empty() => artist = Some(value.to_string()),
                    Tag::Title if !value.is_empty() => title = Some(value.to_string()),
                    _ => {}
                }
                continue;
            }
            if let Some(text) = timed_text(line) {
                if is_credit(text) {
                    if artist.is_none() {
                        artist = credited_artist(text);
                    }
                } else if !text.is_empty() {
                    lyrics.push(text);
                }
            }
        } else if line.starts_with('@') || line.starts_with('【') {
            if let Some((key, value)) = split_key_value(line) {
                let key = key.trim().to_lowercase();
                let value = value.trim().trim_end_matches('】').trim();
                if key.contains("artist") || key.contains("歌手") {
                    artist = Some(value.to_string());
                } else if key.contains("title") || key.contains("歌名") {
                    title = Some(value.to_string());
                }
            }
        } else if !is_credit(line) {
            lyrics.push(line);
        }
    }

    if artist.is_some() && title.is_none() {
        title = title_from_lyrics(&lyrics);
    }
    if let Some(title) = &title {
        lyrics.retain(|line| !line.contains(title.as_str()));
    }

    LrcSong {
        artist,
        title,
        lyric: lyrics.join("\n"),
    }
}

/// `[name:value]` where `name` is a known ID tag.
fn split_id_tag(line: &str) -> Option<(Tag, &str)> {
    let colon = line.find(':')?;
    let close = line.find(']')?;
    if close < colon {
        return None;
    }
    let tag = id_tag(&line[1..colon])?;
    Some((tag, line[colon + 1..close].trim()))
}

/// The text after the timestamps of a timed line, or `None` when the
/// bracket does not hold a timestamp.
fn timed_text(line: &str) -> Option<&str> {
    let close = line.find(']')?;
    let stamp = &line[1..close];
    let is_timestamp = stamp.contains(':')
        && stamp
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ':' | '.' | ','));
    if !is_timestamp {
        return None;
    }
    let text = line.rsplit(']').next().unwrap_or_default();
    Some(text.trim())
}

fn is_credit(text: &str) -> bool {
    CREDIT_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// "作词：方文山" names 方文山.
fn credited_artist(text: &str) -> Option<String> {
    if !ARTIST_CREDITS.iter().any(|kw| text.contains(kw)) {
        return None;
    }
    let (_, name) = split_key_value(text)?;
    let name = name.trim();
    (name.chars().count() > 1).then(|| name.to_string())
}

/// Split at the first ASCII or full-width colon.
fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let pos = text.find(|c: char| c == ':' || c == '：')?;
    let sep_len = text[pos..].chars().next().map_or(1, char::len_utf8);
    Some((&text[..pos], &text[pos + sep_len..]))
}

/// "晴天 - 周杰伦" or "晴天(Live) - 周杰伦" gives 晴天.
fn title_from_lyrics(lyrics: &[&str]) -> Option<String> {
    lyrics.iter().find_map(|line| {
        let (head, _) = line.split_once(" - ")?;
        let head = head.split('(').next().unwrap_or_default().trim();
        (!head.is_empty() && !is_credit(head)).then(|| head.to_string())
    })
}
