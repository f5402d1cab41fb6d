//! # ScaffRS Complexity Scorer
//!
//! File: cli/src/analysis/complexity.rs
//!
//! Turns `Metrics` into a 0-100 score and a coarse `Tier`. The tier decides how
//! much boilerplate the generator writes into each file.
//!
//! | factor      | weight | normalisation                                  |
//! |-------------|--------|------------------------------------------------|
//! | `depth`     | 0.25   | `max_depth / max_expected_depth`               |
//! | `files`     | 0.30   | `ln(1 + files) / ln(1 + max_expected_files)`   |
//! | `branching` | 0.15   | `avg_branching / max_expected_branching`       |
//! | `tests`     | 0.10   | 1 when a tests folder exists                   |
//! | `docs`      | 0.10   | 1 when a docs folder exists                    |
//! | `ci`        | 0.10   | 1 when CI configuration exists                 |
//!
//! Every normalised value is clamped to `[0, 1]`.
//!
use crate::analysis::analyzer::Metrics;
use crate::core::config::ScoringConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const DEPTH_WEIGHT: f64 = 0.25;
const FILES_WEIGHT: f64 = 0.30;
const BRANCHING_WEIGHT: f64 = 0.15;
const FLAG_WEIGHT: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Simple,
    Moderate,
    Complex,
    Enterprise,
}

impl Tier {
    /// `< 25` Simple, `< 55` Moderate, `< 80` Complex, otherwise Enterprise.
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Tier::Simple
        } else if score < 55.0 {
            Tier::Moderate
        } else if score < 80.0 {
            Tier::Complex
        } else {
            Tier::Enterprise
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Simple => "Simple",
            Tier::Moderate => "Moderate",
            Tier::Complex => "Complex",
            Tier::Enterprise => "Enterprise",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub score: f64,
    pub tier: Tier,
    /// Weighted contribution of each factor, as a fraction of 1.
    pub contributing_factors: BTreeMap<String, f64>,
}

/// Scores `metrics` against the configured expectations.
pub fn score(metrics: &Metrics, limits: &ScoringConfig) -> ComplexityReport {
    let depth = ratio(metrics.max_depth as f64, limits.max_expected_depth as f64);
    let files = ratio(
        (metrics.total_files as f64).ln_1p(),
        (limits.max_expected_files as f64).ln_1p(),
    );
    let branching = ratio(
        metrics.average_branching_factor,
        limits.max_expected_branching,
    );

    let factors = [
        ("depth", DEPTH_WEIGHT * depth),
        ("files", FILES_WEIGHT * files),
        ("branching", BRANCHING_WEIGHT * branching),
        ("tests", flag(metrics.has_tests_folder)),
        ("docs", flag(metrics.has_docs_folder)),
        ("ci", flag(metrics.has_ci_config)),
    ];

    let sum: f64 = factors.iter().map(|(_, v)| v).sum();
    let score = (100.0 * sum).clamp(0.0, 100.0);

    ComplexityReport {
        score,
        tier: Tier::from_score(score),
        contributing_factors: factors
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

/// `value / limit` clamped to `[0, 1]`; a non-positive limit yields 0.
fn ratio(value: f64, limit: f64) -> f64 {
    if limit <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / limit).clamp(0.0, 1.0)
}

fn flag(present: bool) -> f64 {
    if present {
        FLAG_WEIGHT
    } else {
        0.0
    }
}
