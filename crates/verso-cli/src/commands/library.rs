use anyhow::{bail, Context, Result};
use std::path::Path;
use verso_core::model::SongEdit;

use super::session::{find_song, short_id};
use super::Session;

pub fn list_songs(session: &Session, search: Option<&str>) -> Result<()> {
    let catalog = session.catalog()?;
    let songs = catalog.search(search.unwrap_or_default());

    if songs.is_empty() {
        if catalog.is_empty() {
            println!("The library is empty. Run `verso import <path>` to add songs.");
        } else {
            println!("No songs match.");
        }
        return Ok(());
    }

    for song in &songs {
        println!(
            "{}  {}  -  {}  ({})",
            short_id(song.id()),
            song.title(),
            song.artist(),
            song.import_time().format("%Y-%m-%d %H:%M")
        );
    }
    println!("\n{} of {} songs", songs.len(), catalog.len());
    Ok(())
}

pub fn remove_song(session: &Session, key: &str) -> Result<()> {
    let mut catalog = session.catalog()?;
    let id = find_song(&catalog, key)?.id();
    let removed = catalog.remove(id)?;
    session.save(&catalog)?;
    println!("Removed {} - {}", removed.title(), removed.artist());
    Ok(())
}

pub fn edit_song(
    session: &Session,
    key: &str,
    artist: Option<String>,
    title: Option<String>,
    lyric_file: Option<&Path>,
) -> Result<()> {
    let lyric = lyric_file
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read lyric file {}", path.display()))
        })
        .transpose()?;

    let edit = SongEdit {
        artist,
        title,
        lyric,
    };
    if edit.is_empty() {
        bail!("Nothing to change; pass --artist, --title, or --lyric-file");
    }

    let mut catalog = session.catalog()?;
    let id = find_song(&catalog, key)?.id();
    let song = catalog.edit(id, edit)?;
    println!("Updated {} - {}", song.title(), song.artist());
    session.save(&catalog)?;
    Ok(())
}
