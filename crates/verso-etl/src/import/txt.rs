//! Plain-text lyric collections.
//!
//! ```text
//! 歌手：周杰伦
//! 歌名：晴天
//! 故事的小黄花
//! 从出生那年就飘着
//!
//! 歌手：林俊杰
//! 歌名：江南
//! ...
//! ```
//!
//! A header line after lyric text starts the next record, so blank lines
//! inside a lyric survive. Both full-width and ASCII colons are accepted.

use super::RawSong;

pub(crate) const ARTIST_HEADER: &str = "歌手";
pub(crate) const TITLE_HEADER: &str = "歌名";

#[derive(Debug, Default)]
struct Block<'a> {
    artist: Option<String>,
    title: Option<String>,
    lines: Vec<&'a str>,
}

impl Block<'_> {
    fn has_text(&self) -> bool {
        self.lines.iter().any(|l| !l.is_empty())
    }

    fn is_empty(&self) -> bool {
        self.artist.is_none() && self.title.is_none() && !self.has_text()
    }

    fn finish(mut self) -> Result<RawSong, String> {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let first_text = self
            .lines
            .iter()
            .position(|l| !l.is_empty())
            .unwrap_or(self.lines.len());
        let lyric = self.lines[first_text..].join("\n");

        match (self.artist, self.title) {
            (Some(artist), Some(title)) => Ok(RawSong {
                artist,
                title,
                lyric,
            }),
            (None, _) => Err(format!("missing {ARTIST_HEADER} header")),
            (_, None) => Err(format!("missing {TITLE_HEADER} header")),
        }
    }
}

fn header<'l>(line: &'l str, name: &str) -> Option<&'l str> {
    let rest = line.strip_prefix(name)?;
    rest.strip_prefix('：')
        .or_else(|| rest.strip_prefix(':'))
        .map(str::trim)
}

pub(crate) fn parse(content: &str) -> Vec<Result<RawSong, String>> {
    let mut records = Vec::new();
    let mut current = Block::default();

    for line in content.lines().map(str::trim) {
        if let Some(artist) = header(line, ARTIST_HEADER) {
            if current.artist.is_some() || current.has_text() {
                records.push(std::mem::take(&mut current).finish());
            }
            current.artist = Some(artist.to_string());
        } else if let Some(title) = header(line, TITLE_HEADER) {
            if current.title.is_some() || current.has_text() {
                records.push(std::mem::take(&mut current).finish());
            }
            current.title = Some(title.to_string());
        } else {
            current.lines.push(line);
        }
    }
    if !current.is_empty() {
        records.push(current.finish());
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_blocks() {
        let content = "歌手：周杰伦\n歌名：晴天\n故事的小黄花\n从出生那年就飘着\n\n歌手:林俊杰\n歌名:江南\n风到这里就是黏\n";
        let records = parse(content);
        assert_eq!(records.len(), 2);
        let first = records[0].as_ref().unwrap();
        assert_eq!(first.artist, "周杰伦");
        assert_eq!(first.title, "晴天");
        assert_eq!(first.lyric, "故事的小黄花\n从出生那年就飘着");
        let second = records[1].as_ref().unwrap();
        assert_eq!(second.artist, "林俊杰");
        assert_eq!(second.lyric, "风到这里就是黏");
    }

    #[test]
    fn test_blank_lines_inside_lyric_survive() {
        let records = parse("歌手：A\n歌名：T\nverse one\n\nverse two\n\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_ref().unwrap().lyric, "verse one\n\nverse two");
    }

    #[test]
    fn test_title_before_artist() {
        let records = parse("歌名：T\n歌手：A\nla");
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.artist, "A");
        assert_eq!(record.title, "T");
    }

    #[test]
    fn test_missing_header_is_reported() {
        let records = parse("some words without headers\n\n歌手：A\n歌名：T\nla");
        assert_eq!(records.len(), 2);
        assert!(records[0].as_ref().unwrap_err().contains(ARTIST_HEADER));
        assert!(records[1].is_ok());
    }

    #[test]
    fn test_empty_content() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }
}
