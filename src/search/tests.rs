use std::collections::HashSet;

use super::inflect::counterpart;
use super::*;
use crate::catalog::{Ingredient, IngredientCatalog};

fn pantry_catalog() -> IngredientCatalog {
    IngredientCatalog::new(
        [
            (1, "egg"),
            (2, "eggs"),
            (3, "eggplant"),
            (4, "brown sugar"),
            (5, "white sugar"),
            (6, "sugar snap peas"),
            (7, "brown rice"),
            (8, "tomatoes"),
            (9, "cherry tomato"),
            (10, "milk"),
            (11, "whole milk"),
            (12, "buttermilk"),
        ]
        .into_iter()
        .map(|(id, name)| Ingredient::new(id, name)),
    )
    .unwrap()
}

fn names(hits: &[SearchHit<'_>]) -> Vec<String> {
    hits.iter().map(|h| h.ingredient.name.clone()).collect()
}

fn query(raw: &str) -> SearchQuery {
    SearchQuery::new(raw).unwrap()
}

#[test]
fn test_query_rejects_empty() {
    assert_eq!(SearchQuery::new(""), Err(SearchError::EmptyQuery));
    assert_eq!(SearchQuery::new("   \t"), Err(SearchError::EmptyQuery));
}

#[test]
fn test_query_normalizes_case_and_padding() {
    let q = query("  Brown SUGAR ");
    assert_eq!(q.as_str(), "brown sugar");
    assert!(q.is_multi_token());
    assert!(!query(" egg ").is_multi_token());
}

#[test]
fn test_single_token_matches_substring_and_inflection() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    let found: HashSet<String> = names(&engine.search(&query("tomato"), 10))
        .into_iter()
        .collect();

    // "tomatoes" comes in through the irregular plural, "cherry tomato" by substring.
    assert_eq!(
        found,
        HashSet::from(["tomatoes".to_string(), "cherry tomato".to_string()])
    );
}

#[test]
fn test_single_token_ranks_exact_match_first() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    let hits = engine.search(&query("egg"), 10);

    assert_eq!(names(&hits), vec!["egg", "eggs", "eggplant"]);
    assert_eq!(hits[0].score, 100.0);
}

#[test]
fn test_multi_token_candidates_share_a_token() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    let q = query("brown sugar");
    let wanted: HashSet<String> = q
        .tokens()
        .flat_map(|t| [t.to_string(), counterpart(t)])
        .collect();

    let hits = engine.search(&q, 100);
    assert!(!hits.is_empty());
    for hit in &hits {
        let tokens = catalog.tokens(hit.ingredient.id).unwrap();
        assert!(
            !tokens.is_disjoint(&wanted),
            "{} shares no token with the query",
            hit.ingredient.name
        );
    }

    let found: HashSet<String> = names(&hits).into_iter().collect();
    assert_eq!(
        found,
        HashSet::from([
            "brown sugar".to_string(),
            "white sugar".to_string(),
            "sugar snap peas".to_string(),
            "brown rice".to_string(),
        ])
    );
    assert_eq!(hits[0].ingredient.name, "brown sugar");
}

#[test]
fn test_multi_token_is_not_substring_match() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    // "buttermilk" contains "milk" but has no "milk" token.
    let found = names(&engine.search(&query("skim milk"), 10));
    assert!(found.contains(&"milk".to_string()));
    assert!(found.contains(&"whole milk".to_string()));
    assert!(!found.contains(&"buttermilk".to_string()));
}

#[test]
fn test_multi_token_uses_inflected_tokens() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    // "tomatoes" shares no literal token with the query, only the plural of "tomato".
    let found: HashSet<String> = names(&engine.search(&query("fresh tomato"), 10))
        .into_iter()
        .collect();
    assert_eq!(
        found,
        HashSet::from(["tomatoes".to_string(), "cherry tomato".to_string()])
    );
}

#[test]
fn test_limit_is_respected() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    for limit in 0..5 {
        for raw in ["egg", "sugar", "brown sugar", "milk", "zzz"] {
            assert!(engine.search(&query(raw), limit).len() <= limit);
        }
    }
    assert!(engine.search(&query("egg"), 0).is_empty());
}

#[test]
fn test_no_candidates_yields_empty() {
    let catalog = pantry_catalog();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    assert!(engine.search(&query("saffron"), 10).is_empty());
    assert!(engine.search(&query("smoked paprika"), 10).is_empty());
}

#[test]
fn test_ties_break_by_name() {
    let catalog = pantry_catalog();
    let flat = |_: &str, _: &str| -> f64 { 50.0 };
    let engine = IngredientSearchEngine::new(&catalog, &flat);

    let found = names(&engine.search(&query("sugar"), 10));
    assert_eq!(found, vec!["brown sugar", "sugar snap peas", "white sugar"]);
}

#[test]
fn test_scorer_is_swappable() {
    let catalog = pantry_catalog();
    // Prefer longer names, the opposite of the default ranking.
    let by_length = |_: &str, candidate: &str| -> f64 { candidate.len() as f64 };
    let engine = IngredientSearchEngine::new(&catalog, &by_length);

    let found = names(&engine.search(&query("egg"), 1));
    assert_eq!(found, vec!["eggplant"]);
}

#[test]
fn test_ie_and_i_plurals_find_their_singulars() {
    let catalog = IngredientCatalog::new(
        [
            (1, "pie crust"),
            (2, "poppy seeds"),
            (3, "cookie dough"),
            (4, "kiwi"),
            (5, "red chili flakes"),
        ]
        .into_iter()
        .map(|(id, name)| Ingredient::new(id, name)),
    )
    .unwrap();
    let scorer = TokenSortRatio::new();
    let engine = IngredientSearchEngine::new(&catalog, &scorer);

    assert_eq!(names(&engine.search(&query("pies"), 10)), vec!["pie crust"]);
    assert_eq!(names(&engine.search(&query("cookies"), 10)), vec!["cookie dough"]);
    assert_eq!(names(&engine.search(&query("kiwis"), 10)), vec!["kiwi"]);
    assert_eq!(
        names(&engine.search(&query("chilies"), 10)),
        vec!["red chili flakes"]
    );
    assert_eq!(
        names(&engine.search(&query("cookies and cream"), 10)),
        vec!["cookie dough"]
    );
}
