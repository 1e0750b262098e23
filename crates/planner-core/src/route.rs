//! Route entity: a directed, dated lane between two nodes with a fixed
//! transport mode and transit time.

use crate::cohort::CohortState;
use crate::ids::NodeId;
use crate::units::DaysSpan;
use serde::{Deserialize, Serialize};

/// Transport mode of a route. Reuses [`CohortState`] since the two are the
/// same closed set of values and a route's mode is exactly the state a
/// shipment travels in (arrival state is then derived from mode plus
/// destination capability — see eq. 3).
pub type TransportMode = CohortState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: NodeId,
    pub destination: NodeId,
    pub transport_mode: TransportMode,
    pub transit_days: DaysSpan,
    pub cost_per_unit: f64,
}

impl Route {
    pub fn departure_date_for_arrival(
        &self,
        arrival_date: chrono::NaiveDate,
    ) -> chrono::NaiveDate {
        arrival_date - chrono::Duration::days(self.transit_days.0)
    }
}
