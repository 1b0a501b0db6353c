//! Vector search for verso.
//!
//! Builds batch-scoped TF-IDF vector spaces over lyrics and ranks songs by
//! cosine similarity, either against another song or against a free-text
//! query.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod cache;
pub mod recommend;
pub mod vector;

pub use recommend::{
    parse_query, pick_random, recommend, similar_songs, ParsedQuery, Recommendation, SongFilter,
};
pub use cache::{SpaceCache, DEFAULT_SPACE_CAPACITY};
pub use vector::{cosine_similarity, VectorSpace};
