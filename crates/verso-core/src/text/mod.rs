pub mod normalize;
pub mod tokenize;

pub use normalize::clean_lyrics;
pub use tokenize::{JiebaTokenizer, Tokenizer, TokenizerKind, UnicodeWordTokenizer};
