//! Starting-inventory snapshot: the cohort balances a rolling-horizon window
//! inherits from the window before it (§4.5's sequential handoff) or that
//! seed the very first window from an external count.

use crate::cohort::{CohortState, InventoryCohortKey};
use crate::ids::{NodeId, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshotEntry {
    pub node: NodeId,
    pub product: ProductId,
    pub production_date: NaiveDate,
    pub state: CohortState,
    pub quantity_units: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub as_of: Option<NaiveDate>,
    pub entries: Vec<InventorySnapshotEntry>,
}

impl InventorySnapshot {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of: Some(as_of),
            entries: Vec::new(),
        }
    }

    /// Converts the snapshot into a keyed cohort map, fixing `current_date`
    /// to `as_of` for every entry. Entries sharing a key sum rather than
    /// overwrite, mirroring [`crate::forecast::Forecast::insert`].
    pub fn to_cohort_map(&self, as_of: NaiveDate) -> HashMap<InventoryCohortKey, f64> {
        let mut map = HashMap::new();
        for entry in &self.entries {
            let key = InventoryCohortKey {
                node: entry.node.clone(),
                product: entry.product.clone(),
                production_date: entry.production_date,
                current_date: as_of,
                state: entry.state,
            };
            *map.entry(key).or_insert(0.0) += entry.quantity_units;
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn to_cohort_map_sums_duplicate_keys() {
        let snapshot = InventorySnapshot {
            as_of: Some(date(2026, 1, 8)),
            entries: vec![
                InventorySnapshotEntry {
                    node: NodeId::new("6104"),
                    product: ProductId::new("P1"),
                    production_date: date(2026, 1, 1),
                    state: CohortState::Ambient,
                    quantity_units: 40.0,
                },
                InventorySnapshotEntry {
                    node: NodeId::new("6104"),
                    product: ProductId::new("P1"),
                    production_date: date(2026, 1, 1),
                    state: CohortState::Ambient,
                    quantity_units: 10.0,
                },
            ],
        };
        let map = snapshot.to_cohort_map(date(2026, 1, 8));
        assert_eq!(map.len(), 1);
        assert_eq!(*map.values().next().unwrap(), 50.0);
    }
}
