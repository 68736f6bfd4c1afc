use std::collections::BTreeSet;

use serial_test::serial;

use super::*;
use crate::store::{MockRecipeStore, RecipeCoverage, RecipeRecord};

fn record(id: i64, title: &str, rating: Option<f64>, weighted: Option<f64>) -> RecipeRecord {
    RecipeRecord {
        recipe_id: id,
        title: title.to_string(),
        url: format!("https://recipes.test/{id}"),
        image_url: None,
        rating,
        weighted_rating: weighted,
    }
}

fn coverage(id: i64, title: &str, n_used: u32, total: u32, score: f64) -> RecipeCoverage {
    RecipeCoverage {
        recipe: record(id, title, Some(4.0), Some(3.5)),
        n_used,
        total_ingredients: total,
        total_score: score,
    }
}

fn ids(values: &[i64]) -> BTreeSet<i64> {
    values.iter().copied().collect()
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_density_key() {
    let row = coverage(1, "Soup", 2, 5, 3.4);
    let key = RankingFormula::CoverageDensity.key(&row);
    assert!(approx_eq(key, 3.4 * 3.4 / 5.0));
}

#[test]
fn test_density_key_zero_total() {
    let row = coverage(1, "Soup", 0, 0, 0.0);
    assert_eq!(RankingFormula::CoverageDensity.key(&row), 0.0);
}

#[test]
fn test_unused_penalty_key() {
    let row = coverage(1, "Soup", 2, 6, 3.4);
    let key = RankingFormula::UnusedPenalty { beta: 0.5 }.key(&row);
    assert!(approx_eq(key, 3.4 - 0.5 * 4.0));
}

#[test]
fn test_rank_orders_by_density() {
    let rows = vec![
        coverage(1, "Low", 1, 10, 1.7),
        coverage(2, "High", 5, 5, 8.5),
        coverage(3, "Mid", 3, 6, 5.1),
    ];

    let ranked = rank(rows, &ScoringPolicy::default(), 10);
    let titles: Vec<_> = ranked.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["High", "Mid", "Low"]);
}

#[test]
fn test_rank_monotonic_in_total_score() {
    let rows = vec![coverage(1, "Less", 2, 8, 3.0), coverage(2, "More", 2, 8, 3.4)];

    let ranked = rank(rows, &ScoringPolicy::default(), 10);
    assert_eq!(ranked[0].id, 2);
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn test_rank_weighted_rating_breaks_ties() {
    let mut a = coverage(1, "Plain", 2, 5, 3.4);
    a.recipe.weighted_rating = Some(3.0);
    let mut b = coverage(2, "Popular", 2, 5, 3.4);
    b.recipe.weighted_rating = Some(4.8);
    let mut c = coverage(3, "Unrated", 2, 5, 3.4);
    c.recipe.weighted_rating = None;

    let ranked = rank(vec![c, a, b], &ScoringPolicy::default(), 10);
    let order: Vec<_> = ranked.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![2, 1, 3]);
}

#[test]
fn test_rank_equal_rows_ordered_by_id() {
    let rows = vec![coverage(9, "Nine", 2, 5, 3.4), coverage(4, "Four", 2, 5, 3.4)];

    let ranked = rank(rows, &ScoringPolicy::default(), 10);
    let order: Vec<_> = ranked.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![4, 9]);
}

#[test]
fn test_rank_excludes_small_recipes() {
    let rows = vec![coverage(1, "Tiny", 4, 4, 6.8), coverage(2, "Enough", 1, 5, 1.7)];

    let ranked = rank(rows, &ScoringPolicy::default(), 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].title, "Enough");
}

#[test]
fn test_rank_excludes_unmatched() {
    let rows = vec![coverage(1, "Nothing", 0, 7, 0.0)];
    assert!(rank(rows, &ScoringPolicy::default(), 10).is_empty());
}

#[test]
fn test_rank_excludes_missing_or_zero_rating() {
    let mut missing = coverage(1, "Missing", 2, 5, 3.4);
    missing.recipe.rating = None;
    let mut zero = coverage(2, "Zero", 2, 5, 3.4);
    zero.recipe.rating = Some(0.0);
    let rated = coverage(3, "Rated", 2, 5, 3.4);

    let ranked = rank(vec![missing, zero, rated], &ScoringPolicy::default(), 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, 3);
}

#[test]
fn test_rank_dedups_titles_keeping_best() {
    let rows = vec![
        coverage(1, "Omelette", 1, 5, 1.7),
        coverage(2, "Omelette", 3, 5, 5.1),
        coverage(3, "Frittata", 2, 5, 3.4),
    ];

    let ranked = rank(rows, &ScoringPolicy::default(), 10);
    let order: Vec<_> = ranked.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![2, 3]);
}

#[test]
fn test_rank_truncates_before_dedup() {
    let rows = vec![
        coverage(1, "Omelette", 3, 5, 5.1),
        coverage(2, "Omelette", 3, 5, 5.0),
        coverage(3, "Frittata", 1, 5, 1.7),
    ];

    // The limit is applied first, so the duplicate eats a slot.
    let ranked = rank(rows, &ScoringPolicy::default(), 2);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, 1);
}

#[test]
fn test_rank_zero_limit() {
    let rows = vec![coverage(1, "Soup", 2, 5, 3.4)];
    assert!(rank(rows, &ScoringPolicy::default(), 0).is_empty());
}

#[test]
fn test_rank_unused_penalty_prefers_fewer_missing() {
    let rows = vec![
        coverage(1, "Long", 3, 20, 5.1),
        coverage(2, "Short", 3, 5, 5.1),
    ];
    let policy = ScoringPolicy::default().with_formula(RankingFormula::UnusedPenalty { beta: 0.1 });

    let ranked = rank(rows, &policy, 10);
    assert_eq!(ranked[0].id, 2);
    assert!(approx_eq(ranked[0].score, 5.1 - 0.2));
}

#[test]
fn test_summary_from_coverage() {
    let row = coverage(7, "Stew", 2, 6, 3.4);
    let summary = RecipeSummary::from_coverage(row, 1.5);

    assert_eq!(summary.id, 7);
    assert_eq!(summary.title, "Stew");
    assert_eq!(summary.url, "https://recipes.test/7");
    assert_eq!(summary.rating, 4.0);
    assert_eq!(summary.n_used, 2);
    assert_eq!(summary.total_ingredients, 6);
    assert_eq!(summary.score, 1.5);
}

#[test]
fn test_policy_default_is_valid() {
    let policy = ScoringPolicy::default();
    assert!(policy.validate().is_ok());
    assert_eq!(policy.alpha, 0.7);
    assert_eq!(policy.min_ingredients, 5);
    assert_eq!(policy.formula, RankingFormula::CoverageDensity);
}

#[test]
fn test_policy_validate_rejects_bad_alpha() {
    for alpha in [0.0, -0.3, 1.5, f64::NAN] {
        let policy = ScoringPolicy::default().with_alpha(alpha);
        assert!(
            matches!(policy.validate(), Err(ScoringError::InvalidPolicy { .. })),
            "alpha {alpha} should be rejected"
        );
    }
    assert!(ScoringPolicy::default().with_alpha(1.0).validate().is_ok());
}

#[test]
fn test_policy_validate_rejects_zero_floor() {
    let policy = ScoringPolicy::default().with_min_ingredients(0);
    assert!(matches!(policy.validate(), Err(ScoringError::InvalidPolicy { .. })));
}

#[test]
fn test_policy_validate_rejects_negative_beta() {
    let policy =
        ScoringPolicy::default().with_formula(RankingFormula::UnusedPenalty { beta: -1.0 });
    assert!(matches!(policy.validate(), Err(ScoringError::InvalidPolicy { .. })));
}

#[test]
fn test_formula_from_str() {
    assert_eq!(
        "density".parse::<RankingFormula>().unwrap(),
        RankingFormula::CoverageDensity
    );
    assert!(matches!(
        " Unused-Penalty ".parse::<RankingFormula>().unwrap(),
        RankingFormula::UnusedPenalty { .. }
    ));
    assert!("cosine".parse::<RankingFormula>().is_err());
}

fn clear_policy_env() {
    unsafe {
        std::env::remove_var("LARDER_ALPHA");
        std::env::remove_var("LARDER_MIN_INGREDIENTS");
        std::env::remove_var("LARDER_RANKING");
        std::env::remove_var("LARDER_BETA");
    }
}

#[test]
#[serial]
fn test_policy_from_env_defaults() {
    clear_policy_env();
    let policy = ScoringPolicy::from_env().unwrap();
    assert_eq!(policy, ScoringPolicy::default());
}

#[test]
#[serial]
fn test_policy_from_env_overrides() {
    clear_policy_env();
    unsafe {
        std::env::set_var("LARDER_ALPHA", "0.5");
        std::env::set_var("LARDER_MIN_INGREDIENTS", "7");
        std::env::set_var("LARDER_RANKING", "unused-penalty");
        std::env::set_var("LARDER_BETA", "0.25");
    }

    let policy = ScoringPolicy::from_env().unwrap();
    clear_policy_env();

    assert_eq!(policy.alpha, 0.5);
    assert_eq!(policy.min_ingredients, 7);
    assert_eq!(policy.formula, RankingFormula::UnusedPenalty { beta: 0.25 });
}

#[test]
#[serial]
fn test_policy_from_env_rejects_malformed_numbers() {
    for (name, value) in [
        ("LARDER_ALPHA", "0,5"),
        ("LARDER_MIN_INGREDIENTS", "five"),
        ("LARDER_BETA", "-"),
    ] {
        clear_policy_env();
        unsafe {
            std::env::set_var("LARDER_RANKING", "unused-penalty");
            std::env::set_var(name, value);
        }

        let result = ScoringPolicy::from_env();
        clear_policy_env();

        assert!(
            matches!(result, Err(ScoringError::InvalidPolicy { .. })),
            "{name}={value} should be rejected"
        );
    }
}

#[test]
#[serial]
fn test_policy_from_env_unknown_formula() {
    clear_policy_env();
    unsafe {
        std::env::set_var("LARDER_RANKING", "magic");
    }

    let result = ScoringPolicy::from_env();
    clear_policy_env();

    assert!(matches!(result, Err(ScoringError::InvalidPolicy { .. })));
}

#[test]
fn test_engine_rejects_invalid_policy() {
    let policy = ScoringPolicy::default().with_alpha(2.0);
    let result = RecipeScoringEngine::new(MockRecipeStore::new(), policy);
    assert!(matches!(result, Err(ScoringError::InvalidPolicy { .. })));
}

#[tokio::test]
async fn test_engine_empty_set_skips_store() {
    let engine = RecipeScoringEngine::new(MockRecipeStore::new(), ScoringPolicy::default()).unwrap();

    let result = engine.score_and_rank(&BTreeSet::new(), &ids(&[4]), 10).await;

    assert!(matches!(result, Err(ScoringError::EmptyIngredientSet)));
    assert!(result.unwrap_err().is_input_error());
    assert_eq!(engine.store().aggregation_count(), 0);
}

#[tokio::test]
async fn test_engine_store_failure_is_surfaced() {
    let store = MockRecipeStore::new();
    store.insert_recipe(record(1, "Soup", Some(4.0), None), [1, 2, 3, 4, 5]);
    store.set_failing(true);
    let engine = RecipeScoringEngine::new(store, ScoringPolicy::default()).unwrap();

    let result = engine.score_and_rank(&ids(&[1]), &BTreeSet::new(), 10).await;

    let err = result.unwrap_err();
    assert!(matches!(err, ScoringError::Store(_)));
    assert!(!err.is_input_error());
    assert!(err.to_string().starts_with("scoring unavailable"));
}

#[tokio::test]
async fn test_engine_egg_and_flour() {
    // egg=1, flour=2, milk=3, salt=4 (pantry); 5 and 6 are other ingredients.
    let store = MockRecipeStore::new();
    store.insert_recipe(record(10, "Recipe A", Some(4.2), Some(4.0)), [1, 2, 3, 4]);
    store.insert_recipe(record(20, "Recipe B", Some(4.6), Some(4.1)), [1, 2, 4, 5, 6]);
    let engine = RecipeScoringEngine::new(store, ScoringPolicy::default()).unwrap();

    let ranked = engine
        .score_and_rank(&ids(&[1, 2]), &ids(&[4]), 200)
        .await
        .unwrap();

    assert_eq!(ranked.len(), 1);
    let b = &ranked[0];
    assert_eq!(b.title, "Recipe B");
    assert_eq!(b.n_used, 2);
    assert_eq!(b.total_ingredients, 5);
    // Salt is a pantry staple but was not chosen, so it contributes nothing.
    assert!(approx_eq(b.score, 3.4 * 3.4 / 5.0));
}

#[tokio::test]
async fn test_engine_pantry_staple_weighs_less() {
    let store = MockRecipeStore::new();
    store.insert_recipe(record(1, "With salt", Some(4.0), None), [1, 4, 5, 6, 7]);
    store.insert_recipe(record(2, "With egg", Some(4.0), None), [2, 8, 9, 10, 11]);
    let engine = RecipeScoringEngine::new(store, ScoringPolicy::default()).unwrap();

    let ranked = engine
        .score_and_rank(&ids(&[2, 4]), &ids(&[4]), 10)
        .await
        .unwrap();

    let order: Vec<_> = ranked.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![2, 1]);
    assert!(approx_eq(ranked[1].score, 1.0 / 5.0));
}
