//! Product entity and the shelf-life constants fixed by the model (§3.1,
//! §4.2.2): 17-day ambient life, 14-day thaw clock, 7-day freshness floor.

use crate::ids::ProductId;
use crate::units::DaysSpan;
use serde::{Deserialize, Serialize};

/// Default ambient shelf life: 17 days from production.
pub const AMBIENT_SHELF_LIFE_DAYS: DaysSpan = DaysSpan(17);
/// Default thawed shelf life: 14 days from the arrival (thaw) date.
pub const THAWED_SHELF_LIFE_DAYS: DaysSpan = DaysSpan(14);
/// Default freshness floor: demand may require cohorts no older than this.
pub const MIN_FRESHNESS_DAYS: DaysSpan = DaysSpan(7);
/// Default units per pallet.
pub const DEFAULT_UNITS_PER_PALLET: u32 = 320;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub units_per_pallet: u32,
    pub ambient_shelf_life_days: DaysSpan,
    /// `None` means effectively unconstrained within any horizon this
    /// planner would run (§3.1: "bounded only by the horizon").
    pub frozen_shelf_life_days: Option<DaysSpan>,
    pub thawed_shelf_life_days: DaysSpan,
}

impl Product {
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            units_per_pallet: DEFAULT_UNITS_PER_PALLET,
            ambient_shelf_life_days: AMBIENT_SHELF_LIFE_DAYS,
            frozen_shelf_life_days: None,
            thawed_shelf_life_days: THAWED_SHELF_LIFE_DAYS,
        }
    }
}
