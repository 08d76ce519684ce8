//! Suggestion tests

mod common;

use common::{advance, pokedex, pokedex_with, MockSource};
use pokefind::{SearchConfig, Strategy};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_suggestions_before_catalog_are_empty() {
    let source = MockSource::kanto().into_arc();
    let pokedex = pokedex(&source);
    assert!(pokedex.suggestions("pikachu").is_empty());
}

#[tokio::test]
async fn test_typo_suggestion() {
    let source = MockSource::kanto().into_arc();
    let pokedex = pokedex(&source);
    pokedex.load_catalog().await;

    assert_eq!(pokedex.suggestions("pikachuu"), vec!["pikachu"]);
    assert_eq!(pokedex.suggestions("PIKACHU")[0], "pikachu");
    assert!(pokedex.suggestions("  ").is_empty());
}

#[tokio::test]
async fn test_prefix_suggestions_ranked() {
    let source = MockSource::kanto().into_arc();
    let pokedex = pokedex(&source);
    pokedex.load_catalog().await;

    let suggestions = pokedex.suggestions("char");
    assert_eq!(suggestions, vec!["charmander", "charmeleon", "charizard"]);
}

#[tokio::test]
async fn test_suggestions_capped_and_from_catalog() {
    let names: Vec<String> = (0..20).map(|i| format!("unown{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let source = MockSource::new(&refs).into_arc();
    let pokedex = pokedex(&source);
    pokedex.load_catalog().await;

    let suggestions = pokedex.suggestions("unown");
    assert_eq!(suggestions.len(), 8);
    let catalog = pokedex.catalog_names();
    assert!(suggestions.iter().all(|s| catalog.contains(s)));
    // equal scores keep catalog order
    assert_eq!(suggestions, catalog[..8].to_vec());
}

#[tokio::test]
async fn test_suggestions_make_no_detail_calls() {
    let source = MockSource::kanto().into_arc();
    let pokedex = pokedex(&source);
    pokedex.load_catalog().await;

    for query in ["b", "bu", "bul", "bulb"] {
        pokedex.suggestions(query);
    }
    assert!(source.detail_calls().is_empty());
    assert_eq!(pokedex.index_builds(), 1);
}

#[tokio::test]
async fn test_edit_distance_strategy() {
    let source = MockSource::kanto().into_arc();
    let config = SearchConfig {
        strategy: Strategy::EditDistance,
        ..SearchConfig::default()
    };
    let pokedex = pokedex_with(&source, config);
    pokedex.load_catalog().await;

    assert_eq!(pokedex.suggestions("pikachuu"), vec!["pikachu"]);
}

#[tokio::test(start_paused = true)]
async fn test_feed_updates_when_catalog_arrives() {
    let source = MockSource::kanto().with_catalog_delay(500).into_arc();
    let pokedex = pokedex(&source);

    let feed = pokedex.suggestion_feed();
    assert!(feed.set_query("squirtle").is_empty());

    let mut rx = feed.subscribe();
    let suggestions = rx.wait_for(|s| !s.is_empty()).await.unwrap().clone();
    assert_eq!(suggestions[0], "squirtle");
    assert_eq!(feed.current(), suggestions);
}

#[tokio::test]
async fn test_feed_tracks_query() {
    let source = MockSource::kanto().into_arc();
    let pokedex = pokedex(&source);
    pokedex.load_catalog().await;

    let feed = pokedex.suggestion_feed();
    assert_eq!(feed.set_query("eeve"), vec!["eevee"]);
    assert!(feed.set_query("").is_empty());
    assert!(feed.current().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_feed_keeps_latest_query_across_catalog_arrival() {
    let names: Vec<String> = (0..20_000).map(|i| format!("name{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let source = MockSource::new(&refs).with_catalog_delay(50).into_arc();
    let config = SearchConfig {
        catalog_limit: names.len(),
        ..SearchConfig::default()
    };
    let pokedex = pokedex_with(&source, config);
    let mut catalog = pokedex.subscribe_catalog();

    // A long query keeps the catalog-driven recompute busy
    let feed = pokedex.suggestion_feed();
    assert!(feed.set_query("nameqrstuvwxyz".repeat(8)).is_empty());

    catalog.changed().await.unwrap();
    advance(5).await;
    let latest = feed.set_query("name7");

    let expected = pokedex.suggestions("name7");
    assert!(!expected.is_empty());
    assert_eq!(latest, expected);
    for _ in 0..40 {
        advance(50).await;
        assert_eq!(feed.current(), expected);
    }
}
