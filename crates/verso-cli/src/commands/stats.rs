use anyhow::{bail, Result};
use verso_analysis::{AnalysisCache, ArtistSummary, NO_STYLE};

use super::Session;

pub fn show_stats(session: &Session, artist: Option<&str>, json: bool) -> Result<()> {
    let catalog = session.catalog()?;
    let analyzer = session.analyzer()?;

    let mut stats = analyzer.artist_statistics(&catalog);
    if let Some(artist) = artist {
        stats.retain(|summary| summary.artist == artist);
        if stats.is_empty() {
            bail!("No songs by {artist}");
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("\n📊 Artist Statistics\n");
    for summary in &stats {
        print_summary(summary);
    }
    Ok(())
}

fn print_summary(summary: &ArtistSummary) {
    println!("{}  ({} songs)", summary.artist, summary.song_count);
    print!("  primary style: {}", summary.primary_style);
    if summary.secondary_style != NO_STYLE {
        print!(", secondary: {}", summary.secondary_style);
    }
    println!("  (diversity {:.2})", summary.style_diversity);

    for score in summary.style_distribution.iter().filter(|s| s.score > 0.0) {
        println!("    {:<12} {:>6.2}%", score.style, score.score);
    }

    if !summary.top_keywords.is_empty() {
        let keywords: Vec<String> = summary
            .top_keywords
            .iter()
            .map(|(word, count)| format!("{word}×{count}"))
            .collect();
        println!("  keywords: {}", keywords.join(" "));
    }
    println!();
}

pub fn show_census(session: &Session) -> Result<()> {
    let catalog = session.catalog()?;
    let analyzer = session.analyzer()?;
    let mut cache = AnalysisCache::new();

    let census = analyzer.style_census(catalog.songs(), &mut cache);
    if census.is_empty() {
        println!("The library is empty.");
        return Ok(());
    }

    println!("\n🎼 Style Census\n");
    for (style, count) in census {
        println!("  {style:<12} {count}");
    }
    Ok(())
}
