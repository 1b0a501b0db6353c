use rand::seq::index;
use rand::Rng;

use verso_core::model::Song;
use verso_core::style::StyleLabels;

use super::SongFilter;

/// Sample up to `n` distinct songs that pass `filter`.
///
/// Results come back in sampling order. Reproducibility is the caller's
/// choice: pass a seeded RNG (`StdRng::seed_from_u64`) for repeatable picks.
pub fn pick_random<'a, R: Rng + ?Sized>(
    catalog: &'a [Song],
    filter: &SongFilter,
    labels: &dyn StyleLabels,
    n: usize,
    rng: &mut R,
) -> Vec<&'a Song> {
    let pool = filter.apply(catalog, labels);
    let amount = n.min(pool.len());
    if amount == 0 {
        return Vec::new();
    }
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use verso_core::style::Unlabeled;

    fn catalog() -> Vec<Song> {
        (0..20)
            .map(|i| {
                let artist = if i % 2 == 0 { "even" } else { "odd" };
                Song::new(artist, format!("song {i}"), "la la").unwrap()
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_pick() {
        let catalog = catalog();
        let filter = SongFilter::default();
        let first = pick_random(&catalog, &filter, &Unlabeled, 5, &mut StdRng::seed_from_u64(7));
        let second = pick_random(&catalog, &filter, &Unlabeled, 5, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_pick_without_replacement() {
        let catalog = catalog();
        let picked = pick_random(
            &catalog,
            &SongFilter::default(),
            &Unlabeled,
            20,
            &mut StdRng::seed_from_u64(1),
        );
        let ids: HashSet<_> = picked.iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_pick_respects_filter_and_pool_size() {
        let catalog = catalog();
        let filter = SongFilter {
            artists: vec!["odd".to_string()],
            ..SongFilter::default()
        };
        let picked = pick_random(&catalog, &filter, &Unlabeled, 50, &mut StdRng::seed_from_u64(3));
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|s| s.artist() == "odd"));
    }

    #[test]
    fn test_pick_empty_pool() {
        let catalog = catalog();
        let filter = SongFilter {
            styles: vec!["rock".to_string()],
            ..SongFilter::default()
        };
        let picked = pick_random(&catalog, &filter, &Unlabeled, 3, &mut StdRng::seed_from_u64(3));
        assert!(picked.is_empty());
    }
}
