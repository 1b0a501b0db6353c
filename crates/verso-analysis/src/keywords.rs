//! Keyword extraction and word frequency.

use std::collections::HashMap;

use verso_core::text::Tokenizer;
use verso_search::VectorSpace;

/// The `top_k` highest-weighted terms of each text, aligned with the input.
///
/// All texts share one vector space, so a text's keywords depend on the
/// rest of the batch: a term common to every text weighs less than one
/// unique to a single text. Zero-weight terms are never returned and ties
/// keep vocabulary order.
pub fn extract_keywords<S: AsRef<str>>(
    texts: &[S],
    top_k: usize,
    tokenizer: &dyn Tokenizer,
) -> Vec<Vec<String>> {
    if texts.iter().all(|t| t.as_ref().trim().is_empty()) {
        return vec![Vec::new(); texts.len()];
    }

    let space = VectorSpace::build(texts, tokenizer);
    (0..space.len())
        .map(|doc| {
            space
                .top_terms(doc, top_k)
                .into_iter()
                .map(String::from)
                .collect()
        })
        .collect()
}

/// The `top_n` most frequent terms of `text` longer than one character.
pub fn word_frequency(text: &str, tokenizer: &dyn Tokenizer, top_n: usize) -> Vec<(String, usize)> {
    most_common(
        tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|word| word.chars().count() > 1),
        top_n,
    )
}

/// Count items and return the `n` most common, most frequent first.
/// Equal counts keep first-occurrence order.
pub fn most_common<I>(items: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for item in items {
        if let Some(&pos) = positions.get(&item) {
            order[pos].1 += 1;
        } else {
            positions.insert(item.clone(), order.len());
            order.push((item, 1));
        }
    }
    // Stable sort keeps first-occurrence order among ties.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(n);
    order
}
