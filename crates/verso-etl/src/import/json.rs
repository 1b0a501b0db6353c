//! JSON lyric arrays: `[{"artist": ..., "title": ..., "lyric": ...}, ...]`.
//!
//! Extra fields (an exported library's `id` and `import_time`) are ignored;
//! imported songs always get fresh ones.

use serde_json::Value;

use super::RawSong;

/// Parse the array, then each element on its own.
///
/// The outer error means the file is unusable. Per-element errors name the
/// problem with that record only.
pub(crate) fn parse(content: &str) -> serde_json::Result<Vec<Result<RawSong, String>>> {
    let values: Vec<Value> = serde_json::from_str(content)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value::<RawSong>(value).map_err(|e| e.to_string()))
        .collect())
}
