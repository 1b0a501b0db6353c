//! Word segmentation.
//!
//! Chinese is written without spaces between words, so neither whitespace
//! splitting nor per-character splitting yields meaningful terms. The
//! default [`JiebaTokenizer`] segments with a word dictionary; the
//! [`UnicodeWordTokenizer`] applies UAX #29 word boundaries and suits
//! corpora in space-delimited languages.
//!
//! Both lowercase their input and discard tokens with no alphanumeric
//! character (whitespace and punctuation).

use jieba_rs::Jieba;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into terms.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }
}

/// Dictionary-based segmentation using jieba's bundled dictionary, with the
/// HMM joining characters of words the dictionary lacks.
pub struct JiebaTokenizer {
    jieba: Jieba,
}

impl JiebaTokenizer {
    /// Load the default dictionary. This takes a noticeable fraction of a
    /// second, so build one tokenizer and share it.
    #[must_use]
    pub fn new() -> Self {
        log::debug!("Loading jieba dictionary");
        Self {
            jieba: Jieba::new(),
        }
    }
}

impl Default for JiebaTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JiebaTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaTokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer for JiebaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.jieba
            .cut(&lowered, true)
            .into_iter()
            .filter_map(keep_term)
            .collect()
    }
}

/// UAX #29 word-boundary segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .unicode_words()
            .filter_map(keep_term)
            .collect()
    }
}

fn keep_term(token: &str) -> Option<String> {
    let token = token.trim();
    token
        .chars()
        .any(char::is_alphanumeric)
        .then(|| token.to_string())
}

/// Which tokenizer to build, as named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    #[default]
    Jieba,
    Unicode,
}

impl TokenizerKind {
    #[must_use]
    pub fn build(self) -> Box<dyn Tokenizer> {
        match self {
            Self::Jieba => Box::new(JiebaTokenizer::new()),
            Self::Unicode => Box::new(UnicodeWordTokenizer),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jieba => write!(f, "jieba"),
            Self::Unicode => write!(f, "unicode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_tokenizer_lowercases_and_drops_punctuation() {
        let tokens = UnicodeWordTokenizer.tokenize("Hello, World! Hello?");
        assert_eq!(tokens, vec!["hello", "world", "hello"]);
    }

    #[test]
    fn test_unicode_tokenizer_blank() {
        assert!(UnicodeWordTokenizer.tokenize("   \n").is_empty());
    }

    #[test]
    fn test_jieba_segments_words_not_characters() {
        let tokens = JiebaTokenizer::new().tokenize("我爱北京天安门");
        assert!(tokens.contains(&"北京".to_string()));
        assert!(tokens.contains(&"天安门".to_string()));
    }

    #[test]
    fn test_jieba_keeps_unknown_words_whole() {
        let tokens = JiebaTokenizer::new().tokenize("他来到了网易杭研大厦");
        assert!(tokens.contains(&"杭研".to_string()), "{tokens:?}");
        assert!(!tokens.contains(&"杭".to_string()));
        assert!(tokens.contains(&"大厦".to_string()));
    }

    #[test]
    fn test_jieba_handles_mixed_text() {
        let tokens = JiebaTokenizer::new().tokenize("Joy joy，sun sun");
        assert_eq!(tokens, vec!["joy", "joy", "sun", "sun"]);
    }

    #[test]
    fn test_jieba_blank() {
        assert!(JiebaTokenizer::new().tokenize("  \t ").is_empty());
    }

    #[test]
    fn test_tokenizer_kind_serde() {
        let kind: TokenizerKind = serde_json::from_str("\"unicode\"").unwrap();
        assert_eq!(kind, TokenizerKind::Unicode);
        assert_eq!(TokenizerKind::default(), TokenizerKind::Jieba);
        assert_eq!(TokenizerKind::Unicode.to_string(), "unicode");
    }

    #[test]
    fn test_boxed_tokenizer() {
        let tokenizer = TokenizerKind::Unicode.build();
        assert_eq!(tokenizer.tokenize("a b"), vec!["a", "b"]);
    }
}
