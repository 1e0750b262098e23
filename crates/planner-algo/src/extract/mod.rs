//! Component D: solution extraction.
//!
//! Reads concrete values out of a solved model's `good_lp::Solution` using
//! the variable handles component B declared, and turns them into typed,
//! cohort-keyed results — the way `growth-rs`'s `extract_solution` walks its
//! decision variables back into a `PlacementSolution` rather than handing
//! callers raw `good_lp::Variable`s.

use chrono::NaiveDate;
use good_lp::Solution;
use planner_core::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::model::VariableHandles;

/// Below this, a variable's solved value is treated as zero — MIP solvers
/// routinely leave a `1e-9`-scale residue on variables that are
/// conceptually unused.
const ZERO_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductionBatch {
    pub node: NodeId,
    pub product: ProductId,
    pub date: NaiveDate,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentPlan {
    pub key: ShipmentCohortKey,
    pub units: f64,
    /// Pallets realized by the shipment's pallet-ceiling variable, not
    /// recomputed by rounding `units` after the fact.
    pub pallets: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLevel {
    pub key: InventoryCohortKey,
    pub units: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemandOutcome {
    pub node: NodeId,
    pub product: ProductId,
    pub date: NaiveDate,
    pub satisfied_units: f64,
    pub shortage_units: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaborUsage {
    pub node: NodeId,
    pub date: NaiveDate,
    pub hours: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostBreakdown {
    pub production: f64,
    pub storage: f64,
    pub transport: f64,
    pub labor: f64,
    pub shortage: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.production + self.storage + self.transport + self.labor + self.shortage
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSolution {
    pub production: Vec<ProductionBatch>,
    pub shipments: Vec<ShipmentPlan>,
    pub inventory: Vec<InventoryLevel>,
    pub demand: Vec<DemandOutcome>,
    pub labor: Vec<LaborUsage>,
    pub cost: CostBreakdown,
}

/// Walks every declared variable's solved value into a [`PlanSolution`],
/// zero-value entries dropped except where a zero is itself informative
/// (a demand outcome always appears, even fully satisfied with no shortage).
pub fn extract_solution(
    solution: &impl Solution,
    handles: &VariableHandles,
    network: &Network,
    cost_structure: &CostStructure,
    labor_calendar: &LaborCalendar,
) -> PlanSolution {
    let mut out = PlanSolution::default();

    for ((node, product, date), &var) in &handles.production {
        let units = solution.value(var);
        out.cost.production += cost_structure.production_cost_per_unit * units;
        if units > ZERO_EPSILON {
            out.production.push(ProductionBatch {
                node: node.clone(),
                product: product.clone(),
                date: *date,
                units,
            });
        }
    }

    for (key, &var) in &handles.inventory {
        let units = solution.value(var);
        out.cost.storage += cost_structure.storage_cost_per_unit_day(key.state) * units;
        if units > ZERO_EPSILON {
            out.inventory.push(InventoryLevel { key: key.clone(), units });
        }
    }

    for (key, &var) in &handles.shipment {
        let units = solution.value(var);
        let rate = network
            .route(&key.origin, &key.destination, key.state)
            .map(|r| r.cost_per_unit)
            .unwrap_or(0.0);
        out.cost.transport += rate * units;
        if units <= ZERO_EPSILON {
            continue;
        }
        let pallets = handles
            .pallets
            .get(&(
                key.origin.clone(),
                key.destination.clone(),
                key.state,
                key.product.clone(),
                key.arrival_date,
            ))
            .map(|&p| solution.value(p).round() as u32)
            .unwrap_or(0);
        out.shipments.push(ShipmentPlan {
            key: key.clone(),
            units,
            pallets,
        });
    }

    let mut satisfied_by_triple: HashMap<(NodeId, ProductId, NaiveDate), f64> = HashMap::new();
    for (key, &var) in &handles.demand_satisfied {
        let units = solution.value(var);
        *satisfied_by_triple
            .entry((key.node.clone(), key.product.clone(), key.demand_date))
            .or_insert(0.0) += units;
    }

    let mut triples: HashSet<(NodeId, ProductId, NaiveDate)> =
        satisfied_by_triple.keys().cloned().collect();
    triples.extend(handles.shortage.keys().cloned());

    for triple in triples {
        let satisfied_units = satisfied_by_triple.get(&triple).copied().unwrap_or(0.0);
        let shortage_units = handles
            .shortage
            .get(&triple)
            .map(|&v| solution.value(v))
            .unwrap_or(0.0);
        out.cost.shortage += cost_structure.shortage_penalty_per_unit * shortage_units;
        out.demand.push(DemandOutcome {
            node: triple.0,
            product: triple.1,
            date: triple.2,
            satisfied_units,
            shortage_units,
        });
    }

    for ((node, date), &var) in &handles.labor_hours {
        let hours = solution.value(var);
        let cost = labor_calendar
            .get(node, *date)
            .map(|day| day.cost_for_hours(hours))
            .unwrap_or(0.0);
        out.cost.labor += cost;
        if hours > ZERO_EPSILON {
            out.labor.push(LaborUsage {
                node: node.clone(),
                date: *date,
                hours,
                cost,
            });
        }
    }

    out
}
