//! Planner configuration: every tunable the index builder, model builder,
//! solver driver, and rolling-horizon driver read, aggregated so a caller
//! constructs one value instead of four.

use serde::{Deserialize, Serialize};

/// Controls cohort-index construction and which soft constraints the model
/// builder enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Enforce shelf-life pruning of cohort keys (§3's shelf-life invariant).
    /// Disabling this is a debugging escape hatch, not a planning mode — it
    /// produces a model that no longer reflects physical reality.
    pub enforce_shelf_life: bool,
    /// Prune inventory/demand cohort pairings whose age exceeds
    /// `product.ambient_shelf_life_days - min_freshness_days` at the demand
    /// date, on top of the hard shelf-life cutoff.
    pub enforce_min_freshness: bool,
    /// Allow demand to go unmet at the shortage penalty cost rather than
    /// making the model infeasible when supply cannot cover demand.
    pub allow_shortages: bool,
    /// Track cohorts at full production-date granularity. Disabling this
    /// collapses same-day production into a single undated batch, which is
    /// only valid for networks where no route or shelf-life window needs
    /// day-level resolution — default on.
    pub use_batch_tracking: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enforce_shelf_life: true,
            enforce_min_freshness: true,
            allow_shortages: true,
            use_batch_tracking: true,
        }
    }
}

/// Controls the MIP solver invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub time_limit_seconds: f64,
    pub mip_gap: f64,
    pub verbose: bool,
    /// Seed the solver with the previous window's solution as a warm start
    /// hint where the backend supports it (§4.2.4).
    pub use_warm_start: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_seconds: 300.0,
            mip_gap: 0.01,
            verbose: false,
            use_warm_start: true,
        }
    }
}

/// Controls how a long horizon is decomposed into overlapping solve windows
/// (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingHorizonConfig {
    pub window_length_days: i64,
    /// How much of each window's tail is re-solved by the next window
    /// rather than committed (the overlap region).
    pub overlap_days: i64,
    /// Only the first `committed_days` of a window's horizon are kept in the
    /// stitched final solution; the rest exists to give the solver
    /// lookahead and is discarded once the next window re-solves it.
    pub committed_days: i64,
    pub granularity: GranularityConfig,
}

impl Default for RollingHorizonConfig {
    fn default() -> Self {
        Self {
            window_length_days: 21,
            overlap_days: 7,
            committed_days: 14,
            granularity: GranularityConfig::default(),
        }
    }
}

/// Temporal aggregation within a window (§4.5.1): near-term days are kept at
/// daily resolution, far-term days are bucketed to shrink the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranularityConfig {
    pub daily_resolution_days: i64,
    pub bucket_size_days: i64,
}

impl Default for GranularityConfig {
    fn default() -> Self {
        Self {
            daily_resolution_days: 14,
            bucket_size_days: 7,
        }
    }
}

impl GranularityConfig {
    /// No aggregation: every day in a window is solved at daily resolution.
    pub fn daily_only() -> Self {
        Self {
            daily_resolution_days: i64::MAX,
            bucket_size_days: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    pub model: ModelConfig,
    pub solver: SolverConfig,
    pub horizon: RollingHorizonConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enforce_shelf_life_and_allow_shortages() {
        let config = PlannerConfig::default();
        assert!(config.model.enforce_shelf_life);
        assert!(config.model.allow_shortages);
        assert!(config.solver.use_warm_start);
    }

    #[test]
    fn daily_only_granularity_never_buckets() {
        let g = GranularityConfig::daily_only();
        assert_eq!(g.bucket_size_days, 1);
    }
}
