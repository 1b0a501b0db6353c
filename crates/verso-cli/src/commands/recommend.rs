use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use verso_analysis::AnalysisCache;
use verso_search::{pick_random, Recommendation, SongFilter};

use super::session::{find_song, short_id};
use super::Session;

pub fn similar(session: &Session, key: &str, count: usize, consider_style: bool) -> Result<()> {
    let catalog = session.catalog()?;
    let analyzer = session.analyzer()?;
    let base = find_song(&catalog, key)?;

    let mut cache = AnalysisCache::new();
    let results = analyzer.similar(base, catalog.songs(), count, consider_style, &mut cache);

    println!("Songs like {} - {}\n", base.title(), base.artist());
    print_results(&results);
    Ok(())
}

pub fn recommend(session: &Session, query: &str) -> Result<()> {
    let catalog = session.catalog()?;
    let analyzer = session.analyzer()?;

    let parsed = verso_search::parse_query(query, analyzer.styles());
    if let Some(style) = &parsed.style {
        println!("  style: {style}");
    }
    if let Some(artist) = &parsed.artist {
        println!("  artist: {artist}");
    }
    if !parsed.keywords.is_empty() {
        println!("  keywords: {}", parsed.keywords.join(", "));
    }
    println!();

    let mut cache = AnalysisCache::new();
    let results = analyzer.recommend(catalog.songs(), query, &mut cache);
    print_results(&results);
    Ok(())
}

/// Style filters need labels; the dictionary is loaded only then.
pub fn pick(
    session: &Session,
    count: usize,
    artists: Vec<String>,
    styles: Vec<String>,
    seed: Option<u64>,
) -> Result<()> {
    let catalog = session.catalog()?;
    let mut cache = AnalysisCache::new();
    if !styles.is_empty() {
        session.analyzer()?.label_catalog(catalog.songs(), &mut cache);
    }

    let filter = SongFilter {
        artists,
        styles,
        ..SongFilter::default()
    };
    let picked = match seed {
        Some(seed) => pick_random(
            catalog.songs(),
            &filter,
            &cache,
            count,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => pick_random(catalog.songs(), &filter, &cache, count, &mut rand::rng()),
    };

    if picked.is_empty() {
        println!("No songs match.");
    }
    for song in picked {
        println!("{}  {} - {}", short_id(song.id()), song.title(), song.artist());
    }
    Ok(())
}

fn print_results(results: &[Recommendation<'_>]) {
    if results.is_empty() {
        println!("No matching songs.");
        return;
    }
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>2}. {:.3}  {}  {} - {}",
            rank + 1,
            result.score,
            short_id(result.song.id()),
            result.song.title(),
            result.song.artist()
        );
    }
}
