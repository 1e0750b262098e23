//! Demand forecast: a sparse set of (node, product, date) quantities driving
//! the demand-satisfaction side of the model (§3.1, §4.2.1 eq. for demand
//! cohorts).

use crate::ids::{NodeId, ProductId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub node: NodeId,
    pub product: ProductId,
    pub date: NaiveDate,
    pub quantity_units: f64,
}

/// Forecast entries indexed by `(node, product, date)` for O(1) lookup during
/// index construction; insertion order is not meaningful, so callers that
/// need deterministic iteration should sort the keys themselves (§5).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Forecast {
    entries: HashMap<(NodeId, ProductId, NaiveDate), f64>,
}

impl Forecast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ForecastEntry>) -> Self {
        let mut forecast = Self::new();
        for entry in entries {
            forecast.insert(entry);
        }
        forecast
    }

    /// Inserts an entry, summing into any existing quantity for the same key
    /// rather than overwriting (two forecast rows for the same day are
    /// additive demand, not a correction).
    pub fn insert(&mut self, entry: ForecastEntry) {
        *self
            .entries
            .entry((entry.node, entry.product, entry.date))
            .or_insert(0.0) += entry.quantity_units;
    }

    pub fn quantity(&self, node: &NodeId, product: &ProductId, date: NaiveDate) -> f64 {
        self.entries
            .get(&(node.clone(), product.clone(), date))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(NodeId, ProductId, NaiveDate), &f64)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn duplicate_entries_for_same_key_sum() {
        let mut forecast = Forecast::new();
        forecast.insert(ForecastEntry {
            node: NodeId::new("6104"),
            product: ProductId::new("P1"),
            date: date(2026, 1, 5),
            quantity_units: 100.0,
        });
        forecast.insert(ForecastEntry {
            node: NodeId::new("6104"),
            product: ProductId::new("P1"),
            date: date(2026, 1, 5),
            quantity_units: 50.0,
        });
        assert_eq!(
            forecast.quantity(&NodeId::new("6104"), &ProductId::new("P1"), date(2026, 1, 5)),
            150.0
        );
    }

    #[test]
    fn missing_key_has_zero_quantity() {
        let forecast = Forecast::new();
        assert_eq!(
            forecast.quantity(&NodeId::new("nowhere"), &ProductId::new("P1"), date(2026, 1, 1)),
            0.0
        );
    }
}
