//! Song recommendation.
//!
//! Three modes share the catalog and the vector space:
//!
//! - [`similar_songs`] ranks the catalog by similarity to one song
//! - [`recommend`] parses a free-text request into filters and keywords and
//!   ranks the filtered catalog against the keywords
//! - [`pick_random`] samples from a filtered catalog with a caller-supplied
//!   random number generator

pub mod filter;
pub mod pick;
pub mod query;
pub mod similar;

pub use filter::SongFilter;
pub use pick::pick_random;
pub use query::{parse_query, recommend, ParsedQuery, MAX_QUERY_RESULTS};
pub use similar::{similar_songs, STYLE_BOOST};

use verso_core::model::Song;

/// A recommended song and its final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub song: &'a Song,
    pub score: f64,
}

/// Sort descending by score, keeping catalog order among equal scores, and
/// keep the first `n`.
fn rank(mut results: Vec<Recommendation<'_>>, n: usize) -> Vec<Recommendation<'_>> {
    // `sort_by` is stable.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(n);
    results
}
