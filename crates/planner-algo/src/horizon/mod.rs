//! Component E: rolling-horizon driver.
//!
//! Solves a long planning horizon as a sequence of overlapping windows
//! (§4.5) rather than one monolithic model: each window gets lookahead past
//! its committed region so the solver can see upcoming demand and shelf-life
//! pressure, but only the committed prefix is kept — the rest is re-solved,
//! with fresher information, as part of the next window. Stitching is exact:
//! a unit committed by window N is never re-counted by window N+1, since the
//! two windows' committed regions never overlap.

use chrono::{Duration, NaiveDate};
use planner_core::prelude::*;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::extract::{self, CostBreakdown, PlanSolution};
use crate::index::build_cohort_index;
use crate::solver::solve_window;

/// Stitched result of a full rolling-horizon run: the committed plan plus
/// which windows (if any) the solver could not satisfy, so a caller can
/// distinguish "solved, no shortages" from "solved, but some windows went
/// infeasible and fell back to carrying inventory forward unchanged".
#[derive(Debug, Clone, Default)]
pub struct RollingHorizonSolution {
    pub plan: PlanSolution,
    pub all_feasible: bool,
    pub failed_windows: Vec<usize>,
    pub diagnostics: Diagnostics,
}

/// Solves `[horizon_start, horizon_end]` window by window, seeding each
/// window with the previous window's ending inventory and keeping only each
/// window's committed prefix in the stitched result. A window the solver
/// proves infeasible does not abort the run: its committed days contribute
/// nothing to the plan, the previous window's ending inventory carries
/// forward unchanged as the next window's starting balance, and the window
/// index is recorded in `failed_windows`. Only a hard error unrelated to
/// infeasibility (a malformed model, a solver backend failure) propagates.
pub fn plan_rolling_horizon(
    network: &Network,
    products: &[Product],
    forecast: &Forecast,
    trucks: &TruckScheduleCollection,
    cost: &CostStructure,
    labor: &LaborCalendar,
    initial_inventory: &InventorySnapshot,
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    config: &PlannerConfig,
) -> PlannerResult<RollingHorizonSolution> {
    let window_days = config.horizon.window_length_days;
    let committed_days = config.horizon.committed_days;
    if window_days <= 0 || committed_days <= 0 {
        return Err(PlannerError::InvalidInput(
            "window_length_days and committed_days must be positive".into(),
        ));
    }
    if committed_days > window_days {
        return Err(PlannerError::InvalidInput(
            "committed_days cannot exceed window_length_days".into(),
        ));
    }
    if horizon_start > horizon_end {
        return Err(PlannerError::InvalidInput(
            "horizon_start must not be after horizon_end".into(),
        ));
    }

    let mut plan = PlanSolution::default();
    let mut diagnostics = Diagnostics::new();
    let mut failed_windows = Vec::new();
    let mut carry = initial_inventory.to_cohort_map(horizon_start);
    let mut cursor = horizon_start;
    let mut window_index = 0usize;

    loop {
        let window_end = (cursor + Duration::days(window_days - 1)).min(horizon_end);
        let committed_end = (cursor + Duration::days(committed_days - 1)).min(window_end);

        let mut window_diag = Diagnostics::new();
        let index = build_cohort_index(
            network,
            products,
            forecast,
            cursor,
            window_end,
            &config.model,
            &mut window_diag,
        );
        diagnostics.merge(window_diag);

        match solve_window(
            &index,
            network,
            products,
            forecast,
            trucks,
            cost,
            labor,
            &carry,
            &config.model,
            &config.solver,
        ) {
            Ok((handles, solution)) => {
                let window_plan = extract::extract_solution(&solution, &handles, network, cost, labor);
                info!(
                    window_index,
                    start = %cursor,
                    end = %window_end,
                    objective = window_plan.cost.total(),
                    "window solved"
                );
                append_committed(&mut plan, &window_plan, cursor, committed_end, network, cost);
                carry = carry_forward(&window_plan, committed_end);
            }
            Err(PlannerError::Infeasible { .. }) => {
                warn!(
                    window_index,
                    start = %cursor,
                    end = %window_end,
                    "window infeasible, carrying prior inventory forward unchanged"
                );
                failed_windows.push(window_index);
            }
            Err(other) => return Err(other),
        }

        if window_end >= horizon_end {
            break;
        }
        cursor += Duration::days(committed_days);
        window_index += 1;
    }

    Ok(RollingHorizonSolution {
        plan,
        all_feasible: failed_windows.is_empty(),
        failed_windows,
        diagnostics,
    })
}

/// Copies every entry from `window` dated within `[start, end]` into `plan`,
/// recomputing that slice's cost contribution rather than pro-rating the
/// window's full-horizon cost (which also prices the discarded lookahead
/// region).
fn append_committed(
    plan: &mut PlanSolution,
    window: &PlanSolution,
    start: NaiveDate,
    end: NaiveDate,
    network: &Network,
    cost: &CostStructure,
) {
    let mut slice_cost = CostBreakdown::default();

    for batch in &window.production {
        if in_range(batch.date, start, end) {
            slice_cost.production += cost.production_cost_per_unit * batch.units;
            plan.production.push(batch.clone());
        }
    }

    for level in &window.inventory {
        if in_range(level.key.current_date, start, end) {
            slice_cost.storage += cost.storage_cost_per_unit_day(level.key.state) * level.units;
            plan.inventory.push(level.clone());
        }
    }

    for shipment in &window.shipments {
        if in_range(shipment.key.arrival_date, start, end) {
            let rate = network
                .route(&shipment.key.origin, &shipment.key.destination, shipment.key.state)
                .map(|r| r.cost_per_unit)
                .unwrap_or(0.0);
            slice_cost.transport += rate * shipment.units;
            plan.shipments.push(shipment.clone());
        }
    }

    for outcome in &window.demand {
        if in_range(outcome.date, start, end) {
            slice_cost.shortage += cost.shortage_penalty_per_unit * outcome.shortage_units;
            plan.demand.push(outcome.clone());
        }
    }

    for usage in &window.labor {
        if in_range(usage.date, start, end) {
            slice_cost.labor += usage.cost;
            plan.labor.push(usage.clone());
        }
    }

    plan.cost.production += slice_cost.production;
    plan.cost.storage += slice_cost.storage;
    plan.cost.transport += slice_cost.transport;
    plan.cost.shortage += slice_cost.shortage;
    plan.cost.labor += slice_cost.labor;
}

fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Reads the committed region's last day of inventory out of a solved
/// window and re-keys it to the following day — the quantity on hand at the
/// close of `committed_end` is exactly what the next window opens with.
fn carry_forward(window: &PlanSolution, committed_end: NaiveDate) -> HashMap<InventoryCohortKey, f64> {
    let next_start = committed_end + Duration::days(1);
    window
        .inventory
        .iter()
        .filter(|level| level.key.current_date == committed_end)
        .map(|level| {
            let key = InventoryCohortKey {
                current_date: next_start,
                ..level.key.clone()
            };
            (key, level.units)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelConfig, RollingHorizonConfig, SolverConfig};
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

    fn flat_labor(node: &NodeId, start: NaiveDate, end: NaiveDate) -> LaborCalendar {
        let mut labor = LaborCalendar::new();
        let mut date = start;
        while date <= end {
            labor.set(
                node.clone(),
                LaborDay {
                    date,
                    is_fixed_day: !LaborCalendar::is_weekend(date),
                    regular_hours: 14.0,
                    max_hours: 14.0,
                    regular_rate_per_hour: 25.0,
                    overtime_rate_per_hour: 37.5,
                    minimum_hours: 4.0,
                    non_fixed_day_minimum_payment: 400.0,
                },
            );
            date += Duration::days(1);
        }
        labor
    }

    #[test]
    fn two_windows_stitch_into_one_continuous_plan_with_no_date_overlap() {
        let network = small_network();
        let products = vec![Product::new("P1")];
        let mut forecast = Forecast::new();
        for day in [5, 12, 19, 26] {
            forecast.insert(ForecastEntry {
                node: NodeId::new("6104"),
                product: ProductId::new("P1"),
                date: date(2026, 1, day),
                quantity_units: 300.0,
            });
        }

        let horizon_start = date(2026, 1, 1);
        let horizon_end = date(2026, 1, 28);
        let labor = flat_labor(&NodeId::new("6122"), date(2025, 12, 20), horizon_end);
        let trucks = TruckScheduleCollection::new();
        let cost = CostStructure {
            production_cost_per_unit: 2.0,
            ambient_storage_cost_per_unit_day: 0.01,
            frozen_storage_cost_per_unit_day: 0.02,
            shortage_penalty_per_unit: 1_000.0,
        };

        let config = PlannerConfig {
            model: ModelConfig::default(),
            solver: SolverConfig {
                time_limit_seconds: 10.0,
                ..SolverConfig::default()
            },
            horizon: RollingHorizonConfig {
                window_length_days: 21,
                overlap_days: 7,
                committed_days: 14,
                ..RollingHorizonConfig::default()
            },
        };

        let result = plan_rolling_horizon(
            &network,
            &products,
            &forecast,
            &trucks,
            &cost,
            &labor,
            &InventorySnapshot::new(horizon_start),
            horizon_start,
            horizon_end,
            &config,
        )
        .unwrap();

        assert!(result.all_feasible);
        assert!(result.failed_windows.is_empty());

        let mut demand_dates: Vec<NaiveDate> = result.plan.demand.iter().map(|d| d.date).collect();
        demand_dates.sort();
        demand_dates.dedup();
        // Every forecast date falls inside exactly one window's committed
        // region, so each should appear exactly once in the stitched plan.
        for day in [5, 12, 19, 26] {
            let count = result
                .plan
                .demand
                .iter()
                .filter(|d| d.date == date(2026, 1, day))
                .count();
            assert_eq!(count, 1, "day {day} should appear exactly once");
        }

        let total_shortage: f64 = result.plan.demand.iter().map(|d| d.shortage_units).sum();
        assert!(total_shortage < 1e-2);
    }

    #[test]
    fn rejects_committed_days_longer_than_window() {
        let network = small_network();
        let products = vec![Product::new("P1")];
        let forecast = Forecast::new();
        let labor = LaborCalendar::new();
        let trucks = TruckScheduleCollection::new();
        let cost = CostStructure {
            production_cost_per_unit: 2.0,
            ambient_storage_cost_per_unit_day: 0.01,
            frozen_storage_cost_per_unit_day: 0.02,
            shortage_penalty_per_unit: 1_000.0,
        };
        let config = PlannerConfig {
            model: ModelConfig::default(),
            solver: SolverConfig::default(),
            horizon: RollingHorizonConfig {
                window_length_days: 7,
                overlap_days: 0,
                committed_days: 14,
                ..RollingHorizonConfig::default()
            },
        };

        let result = plan_rolling_horizon(
            &network,
            &products,
            &forecast,
            &trucks,
            &cost,
            &labor,
            &InventorySnapshot::new(date(2026, 1, 1)),
            date(2026, 1, 1),
            date(2026, 1, 14),
            &config,
        );

        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    }
}
