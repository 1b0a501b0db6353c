use verso_core::model::Song;
use verso_core::style::StyleLabels;
use verso_core::text::Tokenizer;

use super::{rank, Recommendation};
use crate::vector::VectorSpace;

/// Score multiplier for candidates whose style label equals the base song's.
pub const STYLE_BOOST: f64 = 1.2;

/// Rank the catalog by lyric similarity to `base`.
///
/// `base` is excluded by id. Candidates and the base lyric share one vector
/// space, base last. With `consider_style`, a candidate whose label equals
/// the base's label (both must be labelled) gets its score multiplied by
/// [`STYLE_BOOST`]. Returns at most `n` results, fewer when the pool is
/// smaller.
pub fn similar_songs<'a>(
    base: &Song,
    catalog: &'a [Song],
    n: usize,
    consider_style: bool,
    labels: &dyn StyleLabels,
    tokenizer: &dyn Tokenizer,
) -> Vec<Recommendation<'a>> {
    let candidates: Vec<&Song> = catalog.iter().filter(|s| s.id() != base.id()).collect();
    if candidates.is_empty() || n == 0 {
        return Vec::new();
    }

    let mut documents: Vec<&str> = candidates.iter().map(|s| s.lyric()).collect();
    documents.push(base.lyric());
    let space = VectorSpace::build(&documents, tokenizer);

    let base_style = labels.style_of(base.id());
    let results = candidates
        .into_iter()
        .zip(space.similarities_to_last())
        .map(|(song, similarity)| {
            let same_style = consider_style
                && base_style.is_some()
                && labels.style_of(song.id()) == base_style;
            let score = if same_style {
                similarity * STYLE_BOOST
            } else {
                similarity
            };
            Recommendation { song, score }
        })
        .collect();

    rank(results, n)
}
