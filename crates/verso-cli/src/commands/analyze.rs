use anyhow::Result;
use verso_analysis::{word_frequency, AnalysisCache, StyleAnalysis};
use verso_core::model::Song;
use verso_core::text::clean_lyrics;

use super::session::{find_song, short_id};
use super::Session;

/// What `classify` runs on.
#[derive(Debug)]
pub enum Target {
    Song(String),
    Text(String),
    All,
}

pub fn classify(session: &Session, target: Target, json: bool) -> Result<()> {
    let analyzer = session.analyzer()?;

    match target {
        Target::Text(text) => print_analysis(&analyzer.classify_text(&text), json),
        Target::Song(key) => {
            let catalog = session.catalog()?;
            let song = find_song(&catalog, &key)?;
            let mut cache = AnalysisCache::new();
            let analysis = analyzer.classify_song(song, &mut cache);
            if !json {
                println!("{} - {}\n", song.title(), song.artist());
            }
            print_analysis(analysis, json)
        }
        Target::All => {
            let catalog = session.catalog()?;
            let mut cache = AnalysisCache::new();
            analyzer.label_catalog(catalog.songs(), &mut cache);
            if json {
                let labels: serde_json::Map<String, serde_json::Value> = catalog
                    .iter()
                    .filter_map(|song| {
                        let analysis = cache.analysis(song.id())?;
                        Some((song.id().to_string(), serde_json::to_value(analysis).ok()?))
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&labels)?);
            } else {
                for song in &catalog {
                    if let Some(analysis) = cache.analysis(song.id()) {
                        println!(
                            "{}  {:<12}  {}",
                            short_id(song.id()),
                            analysis.primary_style,
                            describe(song)
                        );
                    }
                }
            }
            Ok(())
        }
    }
}

fn print_analysis(analysis: &StyleAnalysis, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    println!("Primary style: {}", analysis.primary_style);
    if analysis.distribution.is_zero() {
        println!("  (no keyword of any style occurs in this text)");
        return Ok(());
    }
    for score in &analysis.distribution {
        println!("  {:<12} {:>6.2}%", score.style, score.score * 100.0);
    }
    Ok(())
}

/// Keywords of the chosen songs, weighed against each other.
pub fn keywords(session: &Session, keys: &[String], top_k: usize) -> Result<()> {
    let catalog = session.catalog()?;
    let analyzer = session.analyzer()?;

    let songs: Vec<&Song> = if keys.is_empty() {
        catalog.iter().collect()
    } else {
        keys.iter()
            .map(|key| find_song(&catalog, key))
            .collect::<Result<_>>()?
    };

    for (song, words) in songs.iter().zip(analyzer.batch_keywords(&songs, top_k)) {
        println!("{}", describe(song));
        if words.is_empty() {
            println!("  (no keywords)");
        } else {
            println!("  {}", words.join(", "));
        }
    }
    Ok(())
}

/// Word counts need no style dictionary, only the tokenizer.
pub fn frequency(session: &Session, key: &str, top: usize) -> Result<()> {
    let catalog = session.catalog()?;
    let song = find_song(&catalog, key)?;
    let tokenizer = session.config.tokenizer.build();
    let text = clean_lyrics(song.lyric(), Some(song.artist()));

    println!("{}\n", describe(song));
    for (word, count) in word_frequency(&text, tokenizer.as_ref(), top) {
        println!("  {word:<16} {count}");
    }
    Ok(())
}

fn describe(song: &Song) -> String {
    format!("{} - {}", song.title(), song.artist())
}
