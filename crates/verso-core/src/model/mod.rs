pub mod catalog;
pub mod ids;
pub mod song;

pub use catalog::Catalog;
pub use ids::SongId;
pub use song::{Song, SongEdit, SongRecord, MAX_LYRIC_CHARS, MAX_NAME_CHARS};
