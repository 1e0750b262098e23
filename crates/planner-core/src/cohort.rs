//! The cohort state machine: a closed, two-valued enum plus the three
//! tuple-keyed index entities ([`InventoryCohortKey`], [`ShipmentCohortKey`],
//! [`DemandCohortKey`]) the index builder and model builder share.
//!
//! Per the design notes, a "thawed" cohort is never a distinct variant —
//! arrival-state determination (eq. 3) always resolves to [`CohortState::Ambient`]
//! or [`CohortState::Frozen`]; the tighter thaw-clock bound is carried by the
//! key's `current_date - production_date` age together with a separate
//! thaw-origin date tracked by the index builder, not by the state enum.

use crate::ids::{NodeId, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Physical storage/transport state of a cohort. Closed: do not add a third
/// variant for "thawed" — see module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CohortState {
    Ambient,
    Frozen,
}

impl CohortState {
    pub fn as_str(self) -> &'static str {
        match self {
            CohortState::Ambient => "ambient",
            CohortState::Frozen => "frozen",
        }
    }
}

/// Key for an inventory-cohort variable: units of `product` at `node` on
/// `current_date` that were produced on `production_date`, currently in
/// `state`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InventoryCohortKey {
    pub node: NodeId,
    pub product: ProductId,
    pub production_date: NaiveDate,
    pub current_date: NaiveDate,
    pub state: CohortState,
}

impl InventoryCohortKey {
    pub fn age_days(&self) -> i64 {
        (self.current_date - self.production_date).num_days()
    }
}

/// Key for a shipment-cohort variable: units of `product` carrying
/// production date `production_date`, departing `origin` so as to arrive at
/// `destination` on `arrival_date`, in transport state `state` (the state
/// the arriving cohort takes on, fixed by the route's mode — never chosen by
/// the solver).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipmentCohortKey {
    pub origin: NodeId,
    pub destination: NodeId,
    pub product: ProductId,
    pub production_date: NaiveDate,
    pub arrival_date: NaiveDate,
    pub state: CohortState,
}

/// Key for a demand-satisfaction variable: units of `product` demanded at
/// `node` on `demand_date`, drawn from the cohort produced on
/// `production_date`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DemandCohortKey {
    pub node: NodeId,
    pub product: ProductId,
    pub production_date: NaiveDate,
    pub demand_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_days_is_current_minus_production() {
        let key = InventoryCohortKey {
            node: NodeId::new("6104"),
            product: ProductId::new("P1"),
            production_date: date(2026, 1, 1),
            current_date: date(2026, 1, 8),
            state: CohortState::Ambient,
        };
        assert_eq!(key.age_days(), 7);
    }

    #[test]
    fn keys_sort_lexicographically_by_field_order() {
        let mut keys = vec![
            InventoryCohortKey {
                node: NodeId::new("B"),
                product: ProductId::new("P1"),
                production_date: date(2026, 1, 1),
                current_date: date(2026, 1, 2),
                state: CohortState::Ambient,
            },
            InventoryCohortKey {
                node: NodeId::new("A"),
                product: ProductId::new("P1"),
                production_date: date(2026, 1, 1),
                current_date: date(2026, 1, 2),
                state: CohortState::Frozen,
            },
        ];
        keys.sort();
        assert_eq!(keys[0].node, NodeId::new("A"));
    }
}
