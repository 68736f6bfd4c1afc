use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ALPHA, DEFAULT_MIN_INGREDIENTS, DEFAULT_UNUSED_PENALTY_BETA};
use crate::store::RecipeCoverage;

use super::error::ScoringError;

/// Primary ranking key applied to each eligible recipe (higher ranks first).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RankingFormula {
    /// `total_score² / total_ingredients`. Squaring favors near-complete matches.
    #[default]
    CoverageDensity,
    /// `total_score − beta · (total_ingredients − n_used)`.
    UnusedPenalty { beta: f64 },
}

impl RankingFormula {
    pub fn key(&self, coverage: &RecipeCoverage) -> f64 {
        let total = f64::from(coverage.total_ingredients);
        match *self {
            RankingFormula::CoverageDensity => {
                if coverage.total_ingredients == 0 {
                    0.0
                } else {
                    coverage.total_score.powi(2) / total
                }
            }
            RankingFormula::UnusedPenalty { beta } => {
                let unused = total - f64::from(coverage.n_used);
                coverage.total_score - beta * unused
            }
        }
    }
}

impl fmt::Display for RankingFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingFormula::CoverageDensity => write!(f, "density"),
            RankingFormula::UnusedPenalty { beta } => write!(f, "unused-penalty(beta={beta})"),
        }
    }
}

/// Parses `density` or `unused-penalty`; the latter uses the default beta.
impl FromStr for RankingFormula {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "density" => Ok(RankingFormula::CoverageDensity),
            "unused-penalty" => Ok(RankingFormula::UnusedPenalty {
                beta: DEFAULT_UNUSED_PENALTY_BETA,
            }),
            other => Err(ScoringError::InvalidPolicy {
                reason: format!("unknown ranking formula '{other}'"),
            }),
        }
    }
}

/// The tunable part of recipe scoring, kept in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    /// Extra weight of a matched non-pantry ingredient, in `(0, 1]`.
    pub alpha: f64,
    /// Recipes tracking fewer ingredients are ineligible.
    pub min_ingredients: u32,
    pub formula: RankingFormula,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            min_ingredients: DEFAULT_MIN_INGREDIENTS,
            formula: RankingFormula::default(),
        }
    }
}

impl ScoringPolicy {
    const ENV_ALPHA: &'static str = "LARDER_ALPHA";
    const ENV_MIN_INGREDIENTS: &'static str = "LARDER_MIN_INGREDIENTS";
    const ENV_RANKING: &'static str = "LARDER_RANKING";
    const ENV_BETA: &'static str = "LARDER_BETA";

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_min_ingredients(mut self, min_ingredients: u32) -> Self {
        self.min_ingredients = min_ingredients;
        self
    }

    pub fn with_formula(mut self, formula: RankingFormula) -> Self {
        self.formula = formula;
        self
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ScoringError::InvalidPolicy {
                reason: format!("alpha must be in (0, 1], got {}", self.alpha),
            });
        }

        if self.min_ingredients == 0 {
            return Err(ScoringError::InvalidPolicy {
                reason: "min_ingredients must be at least 1".to_string(),
            });
        }

        if let RankingFormula::UnusedPenalty { beta } = self.formula
            && !(beta.is_finite() && beta >= 0.0)
        {
            return Err(ScoringError::InvalidPolicy {
                reason: format!("beta must be finite and non-negative, got {beta}"),
            });
        }

        Ok(())
    }

    /// Reads `LARDER_ALPHA`, `LARDER_MIN_INGREDIENTS`, `LARDER_RANKING` and `LARDER_BETA`.
    ///
    /// Unset or blank variables keep their defaults; malformed values are an error.
    pub fn from_env() -> Result<Self, ScoringError> {
        let defaults = Self::default();

        let alpha = env_number(Self::ENV_ALPHA)?.unwrap_or(defaults.alpha);
        let min_ingredients =
            env_number(Self::ENV_MIN_INGREDIENTS)?.unwrap_or(defaults.min_ingredients);

        let mut formula = match std::env::var(Self::ENV_RANKING) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => defaults.formula,
        };

        if let RankingFormula::UnusedPenalty { beta } = &mut formula
            && let Some(value) = env_number(Self::ENV_BETA)?
        {
            *beta = value;
        }

        Ok(Self {
            alpha,
            min_ingredients,
            formula,
        })
    }

    /// Eligibility: something matched, enough ingredients, positive rating.
    pub fn is_eligible(&self, coverage: &RecipeCoverage) -> bool {
        coverage.n_used > 0
            && coverage.total_ingredients >= self.min_ingredients
            && coverage.recipe.rating.is_some_and(|rating| rating > 0.0)
    }
}

fn env_number<T>(name: &str) -> Result<Option<T>, ScoringError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ScoringError::InvalidPolicy {
                reason: format!("{name}={value:?} is not a valid number: {e}"),
            }),
        _ => Ok(None),
    }
}
