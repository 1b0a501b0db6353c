//! Style classification.
//!
//! One vector-space batch holds a synthetic document per style (its
//! keywords, in declaration order) followed by the lyric. Each style's raw
//! score is the cosine similarity between its document and the lyric; the
//! distribution is the raw scores divided by their sum.

use serde::{Serialize, Serializer};

use verso_core::style::StyleDictionary;
use verso_core::text::Tokenizer;
use verso_search::{SpaceCache, VectorSpace};

/// One style's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleScore {
    pub style: String,
    pub score: f64,
}

/// Scores by style, in dictionary order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDistribution {
    scores: Vec<StyleScore>,
}

impl StyleDistribution {
    /// Every style of `styles` at zero.
    #[must_use]
    pub fn zeros(styles: &StyleDictionary) -> Self {
        Self::from_scores(styles.names().map(|name| (name.to_string(), 0.0)))
    }

    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            scores: scores
                .into_iter()
                .map(|(style, score)| StyleScore {
                    style: style.into(),
                    score,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, style: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.style == style)
            .map(|s| s.score)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleScore> {
        self.scores.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.scores.iter().map(|s| s.score).sum()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.scores.iter().all(|s| s.score == 0.0)
    }

    /// The highest-scoring style; the earliest wins a tie.
    #[must_use]
    pub fn argmax(&self) -> Option<&StyleScore> {
        let mut best: Option<&StyleScore> = None;
        for score in &self.scores {
            if best.map_or(true, |b| score.score > b.score) {
                best = Some(score);
            }
        }
        best
    }

    /// Each score divided by the total, or all zero when the total is zero.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.total();
        Self::from_scores(self.scores.iter().map(|s| {
            let share = if total > 0.0 { s.score / total } else { 0.0 };
            (s.style.clone(), share)
        }))
    }
}

impl<'a> IntoIterator for &'a StyleDistribution {
    type Item = &'a StyleScore;
    type IntoIter = std::slice::Iter<'a, StyleScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}

impl Serialize for StyleDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.scores.iter().map(|s| (&s.style, s.score)))
    }
}

/// The outcome of classifying one lyric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleAnalysis {
    /// Style with the highest raw similarity.
    pub primary_style: String,
    /// Normalized shares, summing to 1 or all zero.
    pub distribution: StyleDistribution,
    /// Raw cosine similarities.
    pub raw_scores: StyleDistribution,
}

/// Classify `lyric` against every style of `styles`.
///
/// A blank lyric (or one sharing no term with any style) yields an all-zero
/// distribution with the first declared style as primary.
pub fn classify(lyric: &str, styles: &StyleDictionary, tokenizer: &dyn Tokenizer) -> StyleAnalysis {
    let documents = batch(lyric, styles);
    analyse(&VectorSpace::build(&documents, tokenizer), styles)
}

/// As [`classify`], reusing the space of an identical earlier batch.
pub fn classify_cached(
    lyric: &str,
    styles: &StyleDictionary,
    tokenizer: &dyn Tokenizer,
    spaces: &mut SpaceCache,
) -> StyleAnalysis {
    let documents = batch(lyric, styles);
    analyse(spaces.get_or_build(&documents, tokenizer), styles)
}

fn batch(lyric: &str, styles: &StyleDictionary) -> Vec<String> {
    let mut documents: Vec<String> = styles.iter().map(|s| s.document()).collect();
    documents.push(lyric.to_string());
    documents
}

fn analyse(space: &VectorSpace, styles: &StyleDictionary) -> StyleAnalysis {
    let raw_scores =
        StyleDistribution::from_scores(styles.names().zip(space.similarities_to_last()));
    let distribution = raw_scores.normalized();
    let primary_style = raw_scores
        .argmax()
        .map_or_else(|| styles.first().name.clone(), |s| s.style.clone());

    StyleAnalysis {
        primary_style,
        distribution,
        raw_scores,
    }
}
