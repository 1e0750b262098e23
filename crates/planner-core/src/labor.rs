//! Labor calendar: per-date, per-node staffing cost tiers (regular hours,
//! overtime, non-fixed-day premium) feeding the cost term of the objective
//! (§3.1, §4.2.3).

use crate::ids::NodeId;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborDay {
    pub date: NaiveDate,
    /// Whether this date is a node's fixed working day (normal weekday
    /// staffing). On a non-fixed day any labor hours incur the minimum
    /// payment floor regardless of hours actually used.
    pub is_fixed_day: bool,
    pub regular_hours: f64,
    /// Hard ceiling on total hours worked this day, fixed or non-fixed
    /// (eq. 9's `max_hours`): bounds `overtime_hours_used` on a fixed day
    /// (`<= max_hours - regular_hours`) and `labor_hours_used` directly on a
    /// non-fixed day.
    pub max_hours: f64,
    pub regular_rate_per_hour: f64,
    pub overtime_rate_per_hour: f64,
    /// Minimum hours a non-fixed day must be staffed once any production
    /// occurs that day (eq. 9's `minimum_hours`, e.g. a 4-hour weekend
    /// call-in minimum).
    pub minimum_hours: f64,
    /// Minimum payment owed if the node is staffed at all on a non-fixed day
    /// (§9 open question: scope is per manufacturing node, not shared across
    /// the network — see DESIGN.md).
    pub non_fixed_day_minimum_payment: f64,
}

impl LaborDay {
    pub fn cost_for_hours(&self, hours_used: f64) -> f64 {
        if hours_used <= 0.0 {
            return 0.0;
        }
        if !self.is_fixed_day {
            let worked_cost = hours_used * self.overtime_rate_per_hour;
            return worked_cost.max(self.non_fixed_day_minimum_payment);
        }
        let regular = hours_used.min(self.regular_hours) * self.regular_rate_per_hour;
        let overtime = (hours_used - self.regular_hours).max(0.0) * self.overtime_rate_per_hour;
        regular + overtime
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaborCalendar {
    days: HashMap<(NodeId, NaiveDate), LaborDay>,
}

impl LaborCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, day: LaborDay) {
        self.days.insert((node, day.date), day);
    }

    pub fn get(&self, node: &NodeId, date: NaiveDate) -> Option<&LaborDay> {
        self.days.get(&(node.clone(), date))
    }

    pub fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn days_iter(&self) -> impl Iterator<Item = (&(NodeId, NaiveDate), &LaborDay)> {
        self.days.iter()
    }
}
