//! # planner-algo: cohort-based MIP engine for production & distribution planning
//!
//! Turns a [`planner_core::Network`], product catalog, and forecast into a
//! solved production/shipment/inventory plan, one rolling-horizon window at
//! a time. The components run in this order:
//!
//! 1. [`index`] — builds the cohort key sets a window's model is built over
//! 2. [`model`] — declares decision variables and wires up constraints
//! 3. [`solver`] — drives one MIP solve against a `good_lp` backend
//! 4. [`extract`] — reads the solved values back into typed results
//! 5. [`horizon`] — decomposes a long horizon into overlapping windows and
//!    stitches their committed regions into one plan
//!
//! Building a window's model stays separate from solving it: constraint
//! wiring is generic over the backend, so `model::add_constraints<P:
//! SolverModel>` can be handed to any `good_lp` solver, not just the HiGHS
//! backend `solver` uses by default.
//!
//! ## Example
//!
//! ```ignore
//! use planner_algo::config::PlannerConfig;
//! use planner_algo::horizon::plan_rolling_horizon;
//!
//! let config = PlannerConfig::default();
//! let result = plan_rolling_horizon(
//!     &network, &products, &forecast, &trucks, &cost, &labor,
//!     &initial_inventory, horizon_start, horizon_end, &config,
//! )?;
//! println!("total cost: {}", result.plan.cost.total());
//! ```

pub mod config;
pub mod extract;
pub mod horizon;
pub mod index;
pub mod model;
pub mod solver;

pub use config::{GranularityConfig, ModelConfig, PlannerConfig, RollingHorizonConfig, SolverConfig};
pub use extract::{CostBreakdown, DemandOutcome, LaborUsage, PlanSolution, ProductionBatch, ShipmentPlan};
pub use horizon::{plan_rolling_horizon, RollingHorizonSolution};
pub use index::{build_cohort_index, CohortIndex};
pub use model::VariableHandles;
pub use solver::solve_window;
