//! Truck schedules: fixed weekly departure patterns with per-truck pallet
//! capacity and a same-day production cutoff (§3.1; cutoff supplemented from
//! `original_source/src/models/manufacturing.py`'s truck cutoff hours).

use crate::cohort::CohortState;
use crate::ids::{NodeId, TruckScheduleId};
use crate::units::Pallets;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Which days of the week a truck schedule runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPattern {
    Daily,
    Weekdays,
    Specific(Vec<Weekday>),
}

impl DayPattern {
    pub fn runs_on(&self, day: Weekday) -> bool {
        match self {
            DayPattern::Daily => true,
            DayPattern::Weekdays => !matches!(day, Weekday::Sat | Weekday::Sun),
            DayPattern::Specific(days) => days.contains(&day),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSchedule {
    pub id: TruckScheduleId,
    pub origin: NodeId,
    /// Primary destination this truck serves; together with `transport_mode`
    /// identifies the one route its capacity applies to (eq. 11: trucks
    /// carry only shipments consistent with their own route and mode).
    pub destination: NodeId,
    pub transport_mode: CohortState,
    pub day_pattern: DayPattern,
    pub capacity_pallets: Pallets,
    /// Latest hour (0-23, origin-local) production may complete and still
    /// load onto this truck's same-day departure. `None` means no same-day
    /// loading is possible (the truck only carries inventory produced on a
    /// prior day).
    pub production_cutoff_hour: Option<u8>,
}

impl TruckSchedule {
    pub fn allows_same_day_loading(&self, production_completion_hour: u8) -> bool {
        matches!(self.production_cutoff_hour, Some(cutoff) if production_completion_hour <= cutoff)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TruckScheduleCollection {
    pub schedules: Vec<TruckSchedule>,
}

impl TruckScheduleCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn departing_on<'a>(&'a self, origin: &NodeId, day: Weekday) -> impl Iterator<Item = &'a TruckSchedule> {
        self.schedules
            .iter()
            .filter(move |s| &s.origin == origin && s.day_pattern.runs_on(day))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Trucks departing `origin` on `day` along the specific
    /// `(destination, transport_mode)` route — the set a shipment on that
    /// lane may actually load onto.
    pub fn departing_on_route<'a>(
        &'a self,
        origin: &NodeId,
        destination: &NodeId,
        transport_mode: CohortState,
        day: Weekday,
    ) -> impl Iterator<Item = &'a TruckSchedule> {
        self.departing_on(origin, day)
            .filter(move |s| &s.destination == destination && s.transport_mode == transport_mode)
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_pattern_excludes_weekend() {
        let pattern = DayPattern::Weekdays;
        assert!(pattern.runs_on(Weekday::Mon));
        assert!(!pattern.runs_on(Weekday::Sun));
    }

    #[test]
    fn same_day_loading_respects_cutoff() {
        let truck = TruckSchedule {
            id: TruckScheduleId(1),
            origin: NodeId::new("6122"),
            destination: NodeId::new("6104"),
            transport_mode: CohortState::Ambient,
            day_pattern: DayPattern::Daily,
            capacity_pallets: Pallets(44),
            production_cutoff_hour: Some(12),
        };
        assert!(truck.allows_same_day_loading(11));
        assert!(!truck.allows_same_day_loading(13));
    }

    #[test]
    fn no_cutoff_means_no_same_day_loading() {
        let truck = TruckSchedule {
            id: TruckScheduleId(2),
            origin: NodeId::new("6122"),
            destination: NodeId::new("6104"),
            transport_mode: CohortState::Ambient,
            day_pattern: DayPattern::Daily,
            capacity_pallets: Pallets(44),
            production_cutoff_hour: None,
        };
        assert!(!truck.allows_same_day_loading(0));
    }

    #[test]
    fn departing_on_route_filters_by_destination_and_mode() {
        let mut trucks = TruckScheduleCollection::new();
        trucks.schedules.push(TruckSchedule {
            id: TruckScheduleId(1),
            origin: NodeId::new("6122"),
            destination: NodeId::new("6104"),
            transport_mode: CohortState::Ambient,
            day_pattern: DayPattern::Daily,
            capacity_pallets: Pallets(44),
            production_cutoff_hour: None,
        });
        trucks.schedules.push(TruckSchedule {
            id: TruckScheduleId(2),
            origin: NodeId::new("6122"),
            destination: NodeId::new("6104"),
            transport_mode: CohortState::Frozen,
            day_pattern: DayPattern::Daily,
            capacity_pallets: Pallets(20),
            production_cutoff_hour: None,
        });

        let ambient_only: Vec<_> = trucks
            .departing_on_route(&NodeId::new("6122"), &NodeId::new("6104"), CohortState::Ambient, Weekday::Mon)
            .collect();
        assert_eq!(ambient_only.len(), 1);
        assert_eq!(ambient_only[0].id, TruckScheduleId(1));
    }
}
