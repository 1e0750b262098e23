//! Component B: MIP model builder.
//!
//! Declares the decision variables over the cohort index and wires up the
//! balance, capacity, and linking constraints (§4.2). Building the model is
//! split from solving it (component C): `add_constraints` stays generic over
//! `P: SolverModel`, so any `good_lp` backend can consume the same model.

use chrono::{Datelike, Duration, NaiveDate};
use good_lp::{constraint, variable, Expression, ProblemVariables, SolverModel, Variable};
use hashbrown::HashMap;
use planner_core::prelude::*;

use crate::config::ModelConfig;
use crate::index::CohortIndex;

/// Every decision variable the model declares, keyed so the extractor
/// (component D) can read values back out without re-deriving the keys.
#[derive(Debug, Default)]
pub struct VariableHandles {
    pub production: HashMap<(NodeId, ProductId, NaiveDate), Variable>,
    pub inventory: HashMap<InventoryCohortKey, Variable>,
    pub shipment: HashMap<ShipmentCohortKey, Variable>,
    pub demand_satisfied: HashMap<DemandCohortKey, Variable>,
    pub shortage: HashMap<(NodeId, ProductId, NaiveDate), Variable>,
    pub labor_hours: HashMap<(NodeId, NaiveDate), Variable>,
    /// Portion of a fixed day's `labor_hours` billed at the regular rate,
    /// bounded above by that day's `regular_hours` (only declared for fixed
    /// days — see [`add_constraints`]'s labor-tier block).
    pub regular_hours: HashMap<(NodeId, NaiveDate), Variable>,
    /// Portion of a fixed day's `labor_hours` billed at the overtime rate.
    pub overtime_hours: HashMap<(NodeId, NaiveDate), Variable>,
    /// Whether a non-fixed day (weekend/holiday) was staffed at all, linking
    /// `labor_hours` to `non_fixed_payment`'s minimum-payment floor.
    pub non_fixed_worked: HashMap<(NodeId, NaiveDate), Variable>,
    /// Cost actually billed for a non-fixed day: `max(hours * overtime_rate,
    /// minimum_payment)` once staffed, enforced as a pair of lower bounds.
    pub non_fixed_payment: HashMap<(NodeId, NaiveDate), Variable>,
    /// Integer pallet count per `(origin, destination, mode, product,
    /// arrival_date)`, realizing the pallet-ceiling rule (eq. 10/11):
    /// continuous units shipped that day are rounded up to whole pallets by
    /// this variable, never the other way around. Kept per product rather
    /// than pooled across a lane-day, since two under-a-pallet shipments of
    /// different products can't share a pallet's rounding (S5); kept per
    /// mode since an ambient and a frozen route between the same two nodes
    /// are served by different trucks (eq. 11).
    pub pallets: HashMap<(NodeId, NodeId, CohortState, ProductId, NaiveDate), Variable>,
}

/// Arrival-state rule (eq. 3): a frozen shipment arriving at a destination
/// with no frozen storage mode is implicitly thawed and lands in an
/// `Ambient` inventory cohort instead of the route's own `Frozen` mode; every
/// other combination arrives in the route's mode unchanged. The solver never
/// chooses this — it is a pure function of the route and the destination's
/// storage capability, applied when linking a shipment variable to the
/// inventory cohort it feeds (the shipment's own `state` field keeps meaning
/// "the route's transport mode" so route lookups by mode stay unambiguous).
fn arrival_state(route_mode: CohortState, destination: &Node) -> CohortState {
    if route_mode == CohortState::Frozen && !destination.supports(CohortState::Frozen) {
        CohortState::Ambient
    } else {
        route_mode
    }
}

fn production_dates(index: &CohortIndex) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = index
        .inventory
        .iter()
        .map(|k| k.production_date)
        .chain(index.shipment.iter().map(|k| k.production_date))
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

pub fn declare_variables(
    vars: &mut ProblemVariables,
    index: &CohortIndex,
    network: &Network,
    labor: &LaborCalendar,
) -> VariableHandles {
    let mut handles = VariableHandles::default();

    let products: std::collections::HashSet<&ProductId> =
        index.inventory.iter().map(|k| &k.product).collect();
    let dates = production_dates(index);

    for node in network.manufacturing_nodes() {
        for product_id in &products {
            for &date in &dates {
                handles
                    .production
                    .entry((node.id.clone(), (*product_id).clone(), date))
                    .or_insert_with(|| vars.add(variable().min(0.0)));
            }
        }
    }

    for key in &index.inventory {
        handles
            .inventory
            .entry(key.clone())
            .or_insert_with(|| vars.add(variable().min(0.0)));
    }

    for key in &index.shipment {
        handles
            .shipment
            .entry(key.clone())
            .or_insert_with(|| vars.add(variable().min(0.0)));
    }

    for key in &index.demand {
        handles
            .demand_satisfied
            .entry(key.clone())
            .or_insert_with(|| vars.add(variable().min(0.0)));
    }

    for ((node, product, date), _) in dedup_demand_dates(index) {
        handles
            .shortage
            .entry((node, product, date))
            .or_insert_with(|| vars.add(variable().min(0.0)));
    }

    if let (Some(start), Some(end)) = (index.horizon_start, index.horizon_end) {
        for node in network.manufacturing_nodes() {
            let mut date = start;
            while date <= end {
                let key = (node.id.clone(), date);
                handles
                    .labor_hours
                    .entry(key.clone())
                    .or_insert_with(|| vars.add(variable().min(0.0)));

                match labor.get(&node.id, date) {
                    Some(day) if day.is_fixed_day => {
                        handles
                            .regular_hours
                            .entry(key.clone())
                            .or_insert_with(|| vars.add(variable().min(0.0)));
                        handles
                            .overtime_hours
                            .entry(key)
                            .or_insert_with(|| vars.add(variable().min(0.0)));
                    }
                    Some(_) => {
                        handles
                            .non_fixed_worked
                            .entry(key.clone())
                            .or_insert_with(|| vars.add(variable().binary()));
                        handles
                            .non_fixed_payment
                            .entry(key)
                            .or_insert_with(|| vars.add(variable().min(0.0)));
                    }
                    None => {}
                }
                date += Duration::days(1);
            }
        }
    }

    for key in &index.shipment {
        handles
            .pallets
            .entry((
                key.origin.clone(),
                key.destination.clone(),
                key.state,
                key.product.clone(),
                key.arrival_date,
            ))
            .or_insert_with(|| vars.add(variable().integer().min(0.0)));
    }

    handles
}

fn dedup_demand_dates(index: &CohortIndex) -> Vec<((NodeId, ProductId, NaiveDate), ())> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for key in &index.demand {
        let triple = (key.node.clone(), key.product.clone(), key.demand_date);
        if seen.insert(triple.clone()) {
            out.push((triple, ()));
        }
    }
    out
}

/// Sums labor, production, storage, transport, and shortage cost over every
/// declared variable (§4.2.3).
pub fn build_objective(
    handles: &VariableHandles,
    network: &Network,
    cost: &CostStructure,
    labor: &LaborCalendar,
) -> Expression {
    let mut objective = Expression::from(0.0);

    for &var in handles.production.values() {
        objective += cost.production_cost_per_unit * var;
    }

    for (key, &var) in &handles.inventory {
        objective += cost.storage_cost_per_unit_day(key.state) * var;
    }

    for (key, &var) in &handles.shipment {
        let rate = network
            .route(&key.origin, &key.destination, key.state)
            .map(|r| r.cost_per_unit)
            .unwrap_or(0.0);
        objective += rate * var;
    }

    for (_, &var) in &handles.shortage {
        objective += cost.shortage_penalty_per_unit * var;
    }

    for (key, &day) in labor.days_iter() {
        if day.is_fixed_day {
            if let (Some(&reg), Some(&ot)) = (handles.regular_hours.get(key), handles.overtime_hours.get(key)) {
                objective += day.regular_rate_per_hour * reg;
                objective += day.overtime_rate_per_hour * ot;
            }
        } else if let Some(&payment) = handles.non_fixed_payment.get(key) {
            objective += payment;
        }
    }

    objective
}

/// Adds the balance, capacity, linking, and pallet-ceiling constraints.
/// Generic over the backend so the same model can be sent to any
/// `good_lp` solver. `starting_inventory` seeds cohorts already on hand at
/// `index.horizon_start`, keyed with `current_date` fixed to that date —
/// the rolling-horizon driver's handoff from a prior window's committed
/// region, or an initial count on the very first window.
pub fn add_constraints<P: SolverModel>(
    mut problem: P,
    handles: &VariableHandles,
    index: &CohortIndex,
    network: &Network,
    products: &[Product],
    forecast: &Forecast,
    trucks: &TruckScheduleCollection,
    labor: &LaborCalendar,
    starting_inventory: &std::collections::HashMap<InventoryCohortKey, f64>,
    config: &ModelConfig,
) -> P {
    use std::collections::HashMap as StdMap;

    let product_by_id: StdMap<ProductId, &Product> =
        products.iter().map(|p| (p.id.clone(), p)).collect();

    // --- Labor cost tiers: split a fixed day's hours into a regular portion
    // (capped at the day's regular_hours) and an overtime remainder capped
    // at what's left of max_hours; link a non-fixed day's hours to its
    // worked indicator so the minimum-hours and minimum-payment floors only
    // apply once the day is actually staffed (§3.1, §4.2.2 eq. 9).
    for (key, &day) in labor.days_iter() {
        if day.is_fixed_day {
            if let (Some(&hours_var), Some(&reg), Some(&ot)) = (
                handles.labor_hours.get(key),
                handles.regular_hours.get(key),
                handles.overtime_hours.get(key),
            ) {
                problem = problem.with(constraint!(hours_var == reg + ot));
                problem = problem.with(constraint!(reg <= day.regular_hours));
                problem = problem.with(constraint!(ot <= (day.max_hours - day.regular_hours).max(0.0)));
            }
        } else if let (Some(&hours_var), Some(&worked), Some(&payment)) = (
            handles.labor_hours.get(key),
            handles.non_fixed_worked.get(key),
            handles.non_fixed_payment.get(key),
        ) {
            problem = problem.with(constraint!(hours_var <= day.max_hours * worked));
            problem = problem.with(constraint!(hours_var >= day.minimum_hours * worked));
            problem = problem.with(constraint!(payment >= day.non_fixed_day_minimum_payment * worked));
            problem = problem.with(constraint!(payment >= day.overtime_rate_per_hour * hours_var));
        }
    }

    // --- Production capacity: production <= rate * labor_hours, and <=
    // the node's hard daily ceiling if one is set (§3.1 supplement).
    for ((node_id, _product, date), &p_var) in &handles.production {
        let Some(node) = network.node(node_id) else { continue };
        if let (Some(rate), Some(&hours_var)) = (
            node.production_rate_units_per_hour,
            handles.labor_hours.get(&(node_id.clone(), *date)),
        ) {
            problem = problem.with(constraint!(p_var <= rate * hours_var));
        }
        if let Some(ceiling) = node.max_daily_capacity_units {
            problem = problem.with(constraint!(p_var <= ceiling));
        }
    }

    // --- Inventory balance: inv[cd] = inv[cd-1] (if it exists as a cohort)
    // + same-day production (if cd == production_date and the node
    // manufactures and supports this state) + arriving shipments - departing
    // shipments - demand consumed that day.
    for key in &index.inventory {
        let &inv_var = handles.inventory.get(key).unwrap();

        let mut inflow = Expression::from(0.0);
        let mut outflow = Expression::from(0.0);

        let prior_date = key.current_date - Duration::days(1);
        let prior_key = InventoryCohortKey {
            current_date: prior_date,
            ..key.clone()
        };
        if let Some(&prior_var) = handles.inventory.get(&prior_key) {
            inflow += prior_var;
        } else if index.horizon_start == Some(key.current_date) {
            // No cohort variable exists for the day before this window opens
            // — this is the window's first day, so any carryover from a
            // prior window's handoff enters as a fixed quantity rather than
            // a modeled variable.
            if let Some(&qty) = starting_inventory.get(key) {
                inflow += qty;
            }
        }

        if key.current_date == key.production_date {
            if let Some(&p_var) = handles.production.get(&(key.node.clone(), key.product.clone(), key.production_date)) {
                let node = network.node(&key.node);
                let produces_this_state = node
                    .map(|n| n.storage_modes.contains(&key.state))
                    .unwrap_or(false);
                if produces_this_state {
                    inflow += p_var;
                }
            }
        }

        for arriving in index.shipment.iter().filter(|s| {
            s.destination == key.node
                && s.product == key.product
                && s.production_date == key.production_date
                && s.arrival_date == key.current_date
                && network
                    .node(&s.destination)
                    .map(|n| arrival_state(s.state, n) == key.state)
                    .unwrap_or(false)
        }) {
            if let Some(&s_var) = handles.shipment.get(arriving) {
                inflow += s_var;
            }
        }

        for departing in index.shipment.iter().filter(|s| {
            s.origin == key.node
                && s.product == key.product
                && s.production_date == key.production_date
                && s.state == key.state
                && departure_date(*s, network) == Some(key.current_date)
        }) {
            if let Some(&s_var) = handles.shipment.get(departing) {
                outflow += s_var;
            }
        }

        if let Some(&d_var) = handles.demand_satisfied.get(&DemandCohortKey {
            node: key.node.clone(),
            product: key.product.clone(),
            production_date: key.production_date,
            demand_date: key.current_date,
        }) {
            outflow += d_var;
        }

        problem = problem.with(constraint!(inv_var == inflow - outflow));
    }

    // --- Demand satisfaction: every forecast entry is covered by satisfied
    // demand plus shortage (§4.2.1).
    for ((node, product, date), quantity) in dedup_forecast(forecast) {
        let satisfied: Expression = index
            .demand
            .iter()
            .filter(|k| k.node == node && k.product == product && k.demand_date == date)
            .filter_map(|k| handles.demand_satisfied.get(k).copied())
            .sum();
        let shortage_var = handles.shortage.get(&(node.clone(), product.clone(), date)).copied();

        if let Some(shortage_var) = shortage_var {
            if config.allow_shortages {
                problem = problem.with(constraint!(satisfied + shortage_var == quantity));
            } else {
                problem = problem.with(constraint!(satisfied == quantity));
                problem = problem.with(constraint!(shortage_var == 0.0));
            }
        } else if quantity > 0.0 {
            problem = problem.with(constraint!(satisfied == quantity));
        }
    }

    // --- Pallet ceiling: pallets * units_per_pallet >= units shipped for
    // that product on that lane-day-mode (eq. 10/11), kept per product since
    // a pallet holds one product and can't be split across two (S5).
    for ((origin, destination, mode, product, date), &pallet_var) in &handles.pallets {
        let units: Expression = index
            .shipment
            .iter()
            .filter(|s| {
                &s.origin == origin
                    && &s.destination == destination
                    && s.state == *mode
                    && &s.product == product
                    && &s.arrival_date == date
            })
            .filter_map(|s| handles.shipment.get(s).copied())
            .sum();
        let units_per_pallet = product_by_id
            .get(product)
            .map(|p| p.units_per_pallet)
            .unwrap_or(DEFAULT_UNITS_PER_PALLET) as f64;
        problem = problem.with(constraint!(pallet_var * units_per_pallet >= units));
    }

    // --- Truck capacity: pallets pooled across products on the same
    // lane-day can't exceed the capacity of a truck actually running that
    // (origin, destination, mode) route (eq. 11) — a truck on a different
    // route out of the same origin, or a route in the other mode between
    // the same two nodes, never bounds this lane.
    let mut pallets_by_lane: StdMap<(&NodeId, &NodeId, CohortState, &NaiveDate), Expression> = StdMap::new();
    for ((origin, destination, mode, _product, date), &pallet_var) in &handles.pallets {
        let total = pallets_by_lane
            .entry((origin, destination, *mode, date))
            .or_insert_with(|| Expression::from(0.0));
        *total += pallet_var;
    }
    for ((origin, destination, mode, date), total_pallets) in pallets_by_lane {
        let Some(route) = network.route(origin, destination, mode) else {
            continue;
        };
        let departure = route.departure_date_for_arrival(*date);
        if let Some(truck) = trucks
            .departing_on_route(origin, destination, mode, departure.weekday())
            .max_by_key(|t| t.capacity_pallets.0)
        {
            problem = problem.with(constraint!(total_pallets <= truck.capacity_pallets.0 as f64));
        }
    }

    problem
}

fn departure_date(key: &ShipmentCohortKey, network: &Network) -> Option<NaiveDate> {
    network
        .route(&key.origin, &key.destination, key.state)
        .map(|r| r.departure_date_for_arrival(key.arrival_date))
}

fn dedup_forecast(forecast: &Forecast) -> Vec<((NodeId, ProductId, NaiveDate), f64)> {
    forecast
        .iter()
        .map(|((n, p, d), q)| ((n.clone(), p.clone(), *d), *q))
        .collect()
}
