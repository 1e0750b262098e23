//! Cost structure: per-unit production, storage, and shortage-penalty rates
//! feeding the objective (§4.2.3). Labor cost is not here — it lives on
//! [`crate::labor::LaborDay`] since it is a function of hours, not units.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    pub production_cost_per_unit: f64,
    pub ambient_storage_cost_per_unit_day: f64,
    pub frozen_storage_cost_per_unit_day: f64,
    /// Penalty per unit of unmet demand (§9 open question: scaled per unit,
    /// not per unit-day of lateness — see DESIGN.md).
    pub shortage_penalty_per_unit: f64,
}

impl CostStructure {
    pub fn storage_cost_per_unit_day(&self, state: crate::cohort::CohortState) -> f64 {
        match state {
            crate::cohort::CohortState::Ambient => self.ambient_storage_cost_per_unit_day,
            crate::cohort::CohortState::Frozen => self.frozen_storage_cost_per_unit_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::CohortState;

    #[test]
    fn storage_cost_dispatches_on_state() {
        let cost = CostStructure {
            production_cost_per_unit: 1.0,
            ambient_storage_cost_per_unit_day: 0.02,
            frozen_storage_cost_per_unit_day: 0.05,
            shortage_penalty_per_unit: 10.0,
        };
        assert_eq!(cost.storage_cost_per_unit_day(CohortState::Ambient), 0.02);
        assert_eq!(cost.storage_cost_per_unit_day(CohortState::Frozen), 0.05);
    }
}
