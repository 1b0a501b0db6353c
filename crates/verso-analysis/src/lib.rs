//! Lyric analysis for verso.
//!
//! Classifies lyrics against a style dictionary, extracts keywords and word
//! frequencies, and aggregates both into per-artist summaries. Every
//! operation is a pure function of its inputs; results that are worth
//! keeping between calls go into a caller-owned [`AnalysisCache`].

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod analyzer;
pub mod cache;
pub mod classify;
pub mod keywords;
pub mod stats;

pub use analyzer::Analyzer;
pub use cache::AnalysisCache;
pub use classify::{classify, classify_cached, StyleAnalysis, StyleDistribution, StyleScore};
pub use keywords::{extract_keywords, most_common, word_frequency};
pub use stats::{artist_statistics, style_census, ArtistSummary, NO_STYLE, UNKNOWN_STYLE};
