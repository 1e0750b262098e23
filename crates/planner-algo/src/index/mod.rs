//! Component A: network & cohort index builder.
//!
//! Turns a [`Network`], a product catalog, and a [`Forecast`] into the three
//! cohort key sets the model builder iterates over. Shelf life is enforced
//! here, as index-set membership, rather than as a constraint the solver has
//! to discover — a cohort whose age would exceed its shelf life is simply
//! never a key in these sets.

use chrono::{Duration, NaiveDate};
use planner_core::prelude::*;
use std::collections::HashMap;

/// The three cohort key sets a window's model is built over, plus the date
/// range they were built for.
#[derive(Debug, Clone, Default)]
pub struct CohortIndex {
    pub horizon_start: Option<NaiveDate>,
    pub horizon_end: Option<NaiveDate>,
    pub inventory: Vec<InventoryCohortKey>,
    pub shipment: Vec<ShipmentCohortKey>,
    pub demand: Vec<DemandCohortKey>,
}

fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let days = (end - start).num_days().max(-1);
    (0..=days).map(move |d| start + Duration::days(d))
}

/// Stand-in for "unconstrained within any horizon this planner would run"
/// (no product configures a frozen shelf life this long in practice). Kept
/// small enough that `horizon_start - Duration::days(_)` and friends stay
/// well inside `NaiveDate`'s representable range; `i64::MAX`-scale spans
/// overflow `chrono`'s date arithmetic long before they'd ever bound
/// anything meaningful.
const EFFECTIVELY_UNBOUNDED_SHELF_LIFE: DaysSpan = DaysSpan(36_500);

fn shelf_life_for(product: &Product, state: CohortState) -> DaysSpan {
    match state {
        CohortState::Ambient => product.ambient_shelf_life_days,
        CohortState::Frozen => product
            .frozen_shelf_life_days
            .unwrap_or(EFFECTIVELY_UNBOUNDED_SHELF_LIFE),
    }
}


/// Builds the inventory-cohort key set: every `(node, product, production_date,
/// current_date, state)` the node could plausibly hold, bounded by the
/// window and (if enabled) by shelf life.
pub fn build_inventory_cohorts(
    network: &Network,
    products: &[Product],
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    config: &crate::config::ModelConfig,
    diag: &mut Diagnostics,
) -> Vec<InventoryCohortKey> {
    let mut keys = Vec::new();

    for node in network.graph.node_weights() {
        if node.storage_modes.is_empty() {
            if node.capabilities.can_manufacture || node.capabilities.has_demand {
                diag.add_warning_with_entity(
                    "index",
                    "node has no supported storage mode",
                    &node.id.to_string(),
                );
            }
            continue;
        }

        for product in products {
            for &state in &node.storage_modes {
                let shelf_life = shelf_life_for(product, state);
                let earliest_production = horizon_start - Duration::days(shelf_life.0);

                for production_date in date_range(earliest_production, horizon_end) {
                    let latest_current = production_date + Duration::days(shelf_life.0);
                    let current_start = production_date.max(horizon_start);
                    let current_end = latest_current.min(horizon_end);
                    if current_start > current_end {
                        continue;
                    }
                    for current_date in date_range(current_start, current_end) {
                        let age = DaysSpan((current_date - production_date).num_days());
                        if config.enforce_shelf_life && age.exceeds(shelf_life) {
                            continue;
                        }
                        keys.push(InventoryCohortKey {
                            node: node.id.clone(),
                            product: product.id.clone(),
                            production_date,
                            current_date,
                            state,
                        });
                    }
                }
            }
        }
    }

    keys
}

/// Builds the shipment-cohort key set: every `(origin, destination, product,
/// production_date, arrival_date, state)` a route could carry. `state` is the
/// route's own transport mode, not the possibly-thawed state the cargo ends
/// up in at the destination — the model builder resolves that when linking a
/// shipment to the destination's inventory cohorts, since a frozen route into
/// a destination with no frozen storage mode arrives thawed. Age-at-arrival
/// respects the transit mode's own shelf life, not the arrival state's.
pub fn build_shipment_cohorts(
    network: &Network,
    products: &[Product],
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    config: &crate::config::ModelConfig,
) -> Vec<ShipmentCohortKey> {
    let mut keys = Vec::new();

    for edge in network.graph.edge_weights() {
        for product in products {
            let shelf_life = shelf_life_for(product, edge.transport_mode);
            let earliest_production = horizon_start - Duration::days(shelf_life.0);

            for production_date in date_range(earliest_production, horizon_end) {
                let earliest_arrival = production_date + Duration::days(edge.transit_days.0);
                let latest_arrival = production_date + Duration::days(shelf_life.0);
                let arrival_start = earliest_arrival.max(horizon_start);
                let arrival_end = latest_arrival.min(horizon_end);
                if arrival_start > arrival_end {
                    continue;
                }
                for arrival_date in date_range(arrival_start, arrival_end) {
                    let age = DaysSpan((arrival_date - production_date).num_days());
                    if config.enforce_shelf_life && age.exceeds(shelf_life) {
                        continue;
                    }
                    keys.push(ShipmentCohortKey {
                        origin: edge.origin.clone(),
                        destination: edge.destination.clone(),
                        product: product.id.clone(),
                        production_date,
                        arrival_date,
                        state: edge.transport_mode,
                    });
                }
            }
        }
    }

    keys
}

/// Builds the demand-cohort key set: for every forecast entry, every
/// production date that could plausibly satisfy it, pruned by the tighter
/// of shelf life and the minimum-freshness floor when enforced.
pub fn build_demand_cohorts(
    network: &Network,
    products: &HashMap<ProductId, Product>,
    forecast: &Forecast,
    config: &crate::config::ModelConfig,
    diag: &mut Diagnostics,
) -> Vec<DemandCohortKey> {
    let mut keys = Vec::new();

    for ((node_id, product_id, demand_date), quantity) in forecast.iter() {
        if *quantity <= 0.0 {
            continue;
        }
        let Some(node) = network.node(node_id) else {
            diag.add_error_with_entity("index", "forecast references unknown node", &node_id.to_string());
            continue;
        };
        let Some(product) = products.get(product_id) else {
            diag.add_error_with_entity("index", "forecast references unknown product", &product_id.to_string());
            continue;
        };

        // Widest shelf life across the node's supported storage modes bounds
        // how far back a satisfying production date can be; the model's
        // linking constraint restricts this further to cohorts that
        // actually exist at the node.
        let widest_shelf_life = node
            .storage_modes
            .iter()
            .map(|&state| shelf_life_for(product, state))
            .max()
            .unwrap_or(product.ambient_shelf_life_days);

        let freshness_floor = if config.enforce_min_freshness {
            MIN_FRESHNESS_DAYS
        } else {
            DaysSpan::ZERO
        };
        let latest_age_allowed = DaysSpan((widest_shelf_life - freshness_floor).0.max(0));

        let earliest_production = *demand_date - Duration::days(latest_age_allowed.0);
        for production_date in date_range(earliest_production, *demand_date) {
            keys.push(DemandCohortKey {
                node: node_id.clone(),
                product: product_id.clone(),
                production_date,
                demand_date: *demand_date,
            });
        }
    }

    keys
}

pub fn build_cohort_index(
    network: &Network,
    products: &[Product],
    forecast: &Forecast,
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    config: &crate::config::ModelConfig,
    diag: &mut Diagnostics,
) -> CohortIndex {
    network.validate_into(diag);

    let product_map: HashMap<ProductId, Product> =
        products.iter().map(|p| (p.id.clone(), p.clone())).collect();

    CohortIndex {
        horizon_start: Some(horizon_start),
        horizon_end: Some(horizon_end),
        inventory: build_inventory_cohorts(network, products, horizon_start, horizon_end, config, diag),
        shipment: build_shipment_cohorts(network, products, horizon_start, horizon_end, config),
        demand: build_demand_cohorts(network, &product_map, forecast, config, diag),
    }
}
