//! Component C: solver driver.
//!
//! Builds variables and the objective, adds constraints, and drives one MIP
//! solve with HiGHS — the way `growth-rs`'s `solve()` wires `variables!()` /
//! `.using(highs)` / `.set_time_limit(...)` together. Building the model
//! (component B) stays separate from running it, so a future backend only
//! has to implement this module, not touch the constraint logic.

use good_lp::solvers::highs::highs;
use good_lp::{variables, Solution, SolverModel};
use planner_core::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{ModelConfig, SolverConfig};
use crate::index::CohortIndex;
use crate::model::{self, VariableHandles};

/// Builds the model for one window and solves it with HiGHS, returning the
/// variable handles alongside the solution so the extractor (component D)
/// can read values back without re-deriving the keys. `starting_inventory`
/// seeds cohorts already on hand at the window's first day (see
/// [`model::add_constraints`]); pass an empty map for a window with no
/// carryover.
pub fn solve_window(
    index: &CohortIndex,
    network: &Network,
    products: &[Product],
    forecast: &Forecast,
    trucks: &TruckScheduleCollection,
    cost: &CostStructure,
    labor: &LaborCalendar,
    starting_inventory: &HashMap<InventoryCohortKey, f64>,
    model_config: &ModelConfig,
    solver_config: &SolverConfig,
) -> PlannerResult<(VariableHandles, impl Solution)> {
    let mut vars = variables!();
    let handles = model::declare_variables(&mut vars, index, network, labor);
    let objective = model::build_objective(&handles, network, cost, labor);

    debug!(
        production = handles.production.len(),
        inventory = handles.inventory.len(),
        shipment = handles.shipment.len(),
        pallets = handles.pallets.len(),
        time_limit = solver_config.time_limit_seconds,
        "starting MIP solve"
    );

    let problem = vars
        .minimise(objective)
        .using(highs)
        .set_time_limit(solver_config.time_limit_seconds);

    let problem = model::add_constraints(
        problem,
        &handles,
        index,
        network,
        products,
        forecast,
        trucks,
        labor,
        starting_inventory,
        model_config,
    );

    let start = std::time::Instant::now();
    let solution = problem.solve().map_err(map_resolution_error)?;
    info!(solve_time_ms = start.elapsed().as_secs_f64() * 1000.0, "solve complete");

    Ok((handles, solution))
}

/// Maps a `good_lp` resolution failure onto the unified error type. HiGHS
/// reports infeasibility and unboundedness as distinct outcomes; everything
/// else is a backend error rather than a planning-domain one.
fn map_resolution_error(err: good_lp::ResolutionError) -> PlannerError {
    match err {
        good_lp::ResolutionError::Infeasible => PlannerError::Infeasible { window_id: None },
        other => PlannerError::SolverError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_cohort_index;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn small_network() -> Network {
        let mut network = Network::new();
        network.add_node(Node {
            id: NodeId::new("6122"),
            name: "Manufacturing".into(),
            capabilities: NodeCapabilities {
                can_manufacture: true,
                ..Default::default()
            },
            storage_modes: HashSet::from([CohortState::Ambient]),
            production_rate_units_per_hour: Some(1400.0),
            max_daily_capacity_units: None,
        });
        network.add_node(Node {
            id: NodeId::new("6104"),
            name: "Breadroom".into(),
            capabilities: NodeCapabilities {
                has_demand: true,
                ..Default::default()
            },
            storage_modes: HashSet::from([CohortState::Ambient]),
            production_rate_units_per_hour: None,
            max_daily_capacity_units: None,
        });
        network.add_route(Route {
            origin: NodeId::new("6122"),
            destination: NodeId::new("6104"),
            transport_mode: CohortState::Ambient,
            transit_days: DaysSpan(1),
            cost_per_unit: 0.1,
        });
        network
    }

    #[test]
    fn small_horizon_solves_and_meets_demand() {
        let network = small_network();
        let products = vec![Product::new("P1")];
        let mut forecast = Forecast::new();
        forecast.insert(ForecastEntry {
            node: NodeId::new("6104"),
            product: ProductId::new("P1"),
            date: date(2026, 1, 10),
            quantity_units: 500.0,
        });

        let mut diag = Diagnostics::new();
        let index = build_cohort_index(
            &network,
            &products,
            &forecast,
            date(2026, 1, 1),
            date(2026, 1, 10),
            &ModelConfig::default(),
            &mut diag,
        );

        let cost = CostStructure {
            production_cost_per_unit: 2.0,
            ambient_storage_cost_per_unit_day: 0.01,
            frozen_storage_cost_per_unit_day: 0.02,
            shortage_penalty_per_unit: 1_000.0,
        };
        let mut labor = LaborCalendar::new();
        for day in 1..=9 {
            labor.set(
                NodeId::new("6122"),
                LaborDay {
                    date: date(2026, 1, day),
                    is_fixed_day: true,
                    regular_hours: 12.0,
                    max_hours: 14.0,
                    regular_rate_per_hour: 25.0,
                    overtime_rate_per_hour: 37.5,
                    minimum_hours: 0.0,
                    non_fixed_day_minimum_payment: 0.0,
                },
            );
        }
        let trucks = TruckScheduleCollection::new();

        let (handles, solution) = solve_window(
            &index,
            &network,
            &products,
            &forecast,
            &trucks,
            &cost,
            &labor,
            &HashMap::new(),
            &ModelConfig::default(),
            &SolverConfig {
                time_limit_seconds: 10.0,
                ..SolverConfig::default()
            },
        )
        .unwrap();

        let total_satisfied: f64 = handles
            .demand_satisfied
            .values()
            .map(|&v| solution.value(v))
            .sum();
        assert!(total_satisfied > 0.0);
    }
}
