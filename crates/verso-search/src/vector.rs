//! Batch-scoped TF-IDF vector spaces.
//!
//! A [`VectorSpace`] is fitted over exactly the documents of one batch: the
//! vocabulary and the inverse document frequencies both depend on every
//! member. Vectors from two different spaces have different dimensions and
//! meanings and must never be compared. Consumers therefore put the
//! reference documents and the query into a single batch and slice the
//! result.
//!
//! Weighting follows the smoothed scheme:
//!
//! - `tf(t, d)` is the raw count of term `t` in document `d`
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - each document vector is scaled to unit L2 norm
//!
//! The vocabulary is sorted lexicographically, which fixes the tie order
//! for terms of equal weight.

use std::collections::{BTreeMap, HashMap};

use verso_core::text::Tokenizer;

/// Dense TF-IDF vectors for one batch of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    vectors: Vec<Vec<f64>>,
}

impl VectorSpace {
    /// Fit a vector space over `documents`, in order.
    ///
    /// Never fails: blank documents get all-zero vectors, and a batch in
    /// which every document is blank has an empty vocabulary.
    pub fn build<S: AsRef<str>>(documents: &[S], tokenizer: &dyn Tokenizer) -> Self {
        let term_counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for term in tokenizer.tokenize(doc.as_ref()) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let vocabulary: Vec<String> = document_frequency.keys().map(|t| (*t).to_string()).collect();
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let vectors = term_counts
            .iter()
            .map(|counts| {
                let mut vector = vec![0.0; vocabulary.len()];
                for (term, &count) in counts {
                    let i = index[term.as_str()];
                    vector[i] = count as f64 * idf[i];
                }
                normalize(&mut vector);
                vector
            })
            .collect();

        log::debug!(
            "Built vector space: {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        Self {
            vocabulary,
            vectors,
        }
    }

    /// Terms of this batch, sorted.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of documents in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// The weight vector of document `doc`.
    #[must_use]
    pub fn vector(&self, doc: usize) -> Option<&[f64]> {
        self.vectors.get(doc).map(Vec::as_slice)
    }

    /// Cosine similarity between two documents of this batch; 0 when either
    /// index is out of range.
    #[must_use]
    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        match (self.vector(a), self.vector(b)) {
            (Some(a), Some(b)) => cosine_similarity(a, b),
            _ => 0.0,
        }
    }

    /// Similarity of every document against the last one, excluding the
    /// last itself. This is the shape every consumer uses: references
    /// first, query last.
    #[must_use]
    pub fn similarities_to_last(&self) -> Vec<f64> {
        let Some(last) = self.len().checked_sub(1) else {
            return Vec::new();
        };
        (0..last).map(|i| self.similarity(i, last)).collect()
    }

    /// Up to `k` terms of document `doc` by descending weight. Zero-weight
    /// terms are never returned; equal weights keep vocabulary order.
    #[must_use]
    pub fn top_terms(&self, doc: usize, k: usize) -> Vec<&str> {
        let Some(vector) = self.vector(doc) else {
            return Vec::new();
        };
        let mut weighted: Vec<(usize, f64)> = vector
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, w)| w > 0.0)
            .collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
        weighted
            .into_iter()
            .take(k)
            .map(|(i, _)| self.vocabulary[i].as_str())
            .collect()
    }
}

/// `dot(a, b) / (|a| * |b|)`, defined as 0 when either norm is 0 or the
/// vectors differ in length.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
