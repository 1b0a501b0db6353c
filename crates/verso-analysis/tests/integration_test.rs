//! End-to-end analysis over a small catalog.

use verso_analysis::{AnalysisCache, Analyzer, NO_STYLE, UNKNOWN_STYLE};
use verso_core::model::{Catalog, Song, SongEdit};
use verso_core::style::StyleDictionary;
use verso_core::text::TokenizerKind;

const STYLES: &str = r#"{
    "中国风": ["江南", "烟雨", "青花瓷", "月光"],
    "摇滚": ["呐喊", "自由", "燃烧"],
    "情歌": ["思念", "爱你", "眼泪"]
}"#;

fn analyzer() -> Analyzer {
    let styles = StyleDictionary::from_json_str(STYLES).unwrap();
    Analyzer::with_kind(styles, TokenizerKind::Jieba)
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (artist, title, lyric) in [
        ("周杰伦", "青花瓷", "作词：方文山\n[00:10.00]天青色等烟雨 而我在等你\n[00:15.00]月光 江南 烟雨"),
        ("周杰伦", "夜曲", "为你弹奏肖邦的夜曲\n思念 眼泪 爱你"),
        ("许巍", "曾经的你", "自由 呐喊 燃烧\n每一次难过的时候"),
        ("无名", "空白", "啦啦啦"),
    ] {
        catalog.add(Song::new(artist, title, lyric).unwrap()).unwrap();
    }
    catalog
}

#[test]
fn test_catalog_labels_and_census() {
    let analyzer = analyzer();
    let catalog = catalog();
    let mut cache = AnalysisCache::new();

    let census = analyzer.style_census(catalog.songs(), &mut cache);
    assert_eq!(cache.len(), catalog.len());

    let total: usize = census.iter().map(|(_, count)| count).sum();
    assert_eq!(total, catalog.len());

    let qinghuaci = &catalog.songs()[0];
    assert_eq!(analyzer.classify_song(qinghuaci, &mut cache).primary_style, "中国风");
    let rock = &catalog.songs()[2];
    assert_eq!(analyzer.classify_song(rock, &mut cache).primary_style, "摇滚");
}

#[test]
fn test_distributions_sum_to_one_or_zero() {
    let analyzer = analyzer();
    let mut cache = AnalysisCache::new();
    for song in &catalog() {
        let analysis = analyzer.classify_song(song, &mut cache);
        let total = analysis.distribution.total();
        assert!(
            (total - 1.0).abs() < 1e-9 || analysis.distribution.is_zero(),
            "{}: {total}",
            song.title()
        );
    }
}

#[test]
fn test_artist_statistics() {
    let analyzer = analyzer();
    let stats = analyzer.artist_statistics(&catalog());

    let artists: Vec<&str> = stats.iter().map(|s| s.artist.as_str()).collect();
    assert_eq!(artists, vec!["周杰伦", "许巍", "无名"]);

    let jay = &stats[0];
    assert_eq!(jay.song_count, 2);
    assert_ne!(jay.primary_style, UNKNOWN_STYLE);
    assert_ne!(jay.secondary_style, NO_STYLE);
    assert!(jay.style_diversity >= 0.0);
    assert!(!jay.top_keywords.is_empty());

    let nobody = &stats[2];
    assert_eq!(nobody.primary_style, UNKNOWN_STYLE);
    assert_eq!(nobody.style_diversity, 0.0);
}

#[test]
fn test_similar_never_returns_base() {
    let analyzer = analyzer();
    let catalog = catalog();
    let mut cache = AnalysisCache::new();
    let base = &catalog.songs()[0];

    let results = analyzer.similar(base, catalog.songs(), 10, true, &mut cache);
    assert_eq!(results.len(), catalog.len() - 1);
    assert!(results.iter().all(|r| r.song.id() != base.id()));
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_recommend_by_artist_and_keyword() {
    let analyzer = analyzer();
    let catalog = catalog();
    let mut cache = AnalysisCache::new();

    let results = analyzer.recommend(catalog.songs(), "周杰伦的歌 思念", &mut cache);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].song.title(), "夜曲");
}

#[test]
fn test_edit_then_invalidate_reclassifies() {
    let analyzer = analyzer();
    let mut catalog = catalog();
    let mut cache = AnalysisCache::new();
    let id = catalog.songs()[3].id();

    let before = analyzer
        .classify_song(catalog.get(id).unwrap(), &mut cache)
        .primary_style
        .clone();

    let edit = SongEdit {
        lyric: Some("自由 自由 呐喊".to_string()),
        ..SongEdit::default()
    };
    catalog.edit(id, edit).unwrap();
    cache.invalidate(id);

    let after = &analyzer
        .classify_song(catalog.get(id).unwrap(), &mut cache)
        .primary_style;
    assert_eq!(after, "摇滚");
    assert_ne!(&before, after);
}
