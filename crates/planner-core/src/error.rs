//! Unified error type for the planning core.
//!
//! [`PlannerError`] gives every layer (index builder, model builder, solver
//! driver, extractor, rolling-horizon driver) one error enum to return, with
//! one variant per the error taxonomy fixed by the design: invalid input,
//! infeasible model, solver failure, time limit without an incumbent, and
//! inconsistent snapshot data. Callers match on the variant rather than
//! parsing message text.

use thiserror::Error;

/// Unified error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Malformed or out-of-bounds caller input: a missing labor day, a route
    /// to an unknown node, a forecast entry outside the horizon, a negative
    /// quantity, `overlap_days >= window_size_days`, and similar.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver proved infeasibility and `allow_shortages` was false, so
    /// there is no relaxation left to absorb unmet demand.
    #[error("infeasible model{}", window_id.map(|w| format!(" (window {w})")).unwrap_or_default())]
    Infeasible { window_id: Option<usize> },

    /// The solver backend itself failed (missing binding, internal error).
    #[error("solver error: {0}")]
    SolverError(String),

    /// The solver hit its time limit before finding any feasible incumbent.
    #[error("time limit reached with no feasible incumbent")]
    TimeLimitNoIncumbent,

    /// The initial inventory snapshot referenced an unknown node/product or
    /// carried a negative quantity.
    #[error("inconsistent inventory snapshot: {0}")]
    InconsistentSnapshot(String),
}

/// Convenience alias used throughout the workspace.
pub type PlannerResult<T> = Result<T, PlannerError>;

impl From<anyhow::Error> for PlannerError {
    fn from(err: anyhow::Error) -> Self {
        PlannerError::InvalidInput(err.to_string())
    }
}
