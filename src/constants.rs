//! Cross-cutting, shared constants.
//!
//! The scoring values here are defaults only. The live values travel through
//! [`ScoringPolicy`](crate::scoring::ScoringPolicy), which can be overridden from the environment.

/// Number of ingredient names returned by a search when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Number of ranked recipes kept (before title de-duplication) when the caller gives no limit.
pub const DEFAULT_RANK_LIMIT: usize = 200;

/// Extra weight given to a matched ingredient that is not a pantry staple.
pub const DEFAULT_ALPHA: f64 = 0.7;

/// Recipes tracking fewer ingredients than this are never ranked.
pub const DEFAULT_MIN_INGREDIENTS: u32 = 5;

/// Penalty per unused ingredient for [`RankingFormula::UnusedPenalty`](crate::scoring::RankingFormula).
pub const DEFAULT_UNUSED_PENALTY_BETA: f64 = 0.1;

/// Upper bound for similarity scores produced by [`Similarity`](crate::search::Similarity).
pub const MAX_SIMILARITY: f64 = 100.0;

/// Default capacity of the search-result cache.
pub const DEFAULT_SEARCH_CACHE_CAPACITY: u64 = 10_000;
