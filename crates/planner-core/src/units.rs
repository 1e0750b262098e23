//! Compile-time unit safety for the small set of quantities the planner
//! juggles: unit counts, pallet counts, and day spans.
//!
//! Mixing a raw unit count with a pallet count is a classic off-by-320 bug
//! (see eq. 10 and eq. 11 of the model); this module gives each its own type
//! so the compiler catches the mistake instead of a solver run.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Sub};

/// Units of a single product, as produced/shipped/stored (not rounded to
/// pallets).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Units(pub f64);

impl Units {
    pub const ZERO: Units = Units(0.0);

    /// Round up to the number of pallets this many units occupies, per the
    /// pallet-ceiling rule `⌈units / units_per_pallet⌉`.
    pub fn pallet_ceiling(self, units_per_pallet: u32) -> Pallets {
        if self.0 <= 0.0 {
            return Pallets(0);
        }
        Pallets((self.0 / units_per_pallet as f64).ceil() as u32)
    }
}

impl Add for Units {
    type Output = Units;
    fn add(self, rhs: Units) -> Units {
        Units(self.0 + rhs.0)
    }
}

impl Sub for Units {
    type Output = Units;
    fn sub(self, rhs: Units) -> Units {
        Units(self.0 - rhs.0)
    }
}

/// An integer pallet count, as used for storage ceilings and truck loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pallets(pub u32);

impl Pallets {
    pub const ZERO: Pallets = Pallets(0);

    pub fn units_capacity(self, units_per_pallet: u32) -> Units {
        Units(self.0 as f64 * units_per_pallet as f64)
    }
}

impl Add for Pallets {
    type Output = Pallets;
    fn add(self, rhs: Pallets) -> Pallets {
        Pallets(self.0 + rhs.0)
    }
}

/// A day count, used for ages and shelf-life comparisons. Kept distinct from
/// a bare `i64` so a production-date-minus-current-date subtraction can't be
/// silently swapped with a transit-days field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaysSpan(pub i64);

impl DaysSpan {
    pub const ZERO: DaysSpan = DaysSpan(0);

    pub fn exceeds(self, limit: DaysSpan) -> bool {
        self.0 > limit.0
    }
}

impl Sub for DaysSpan {
    type Output = DaysSpan;
    fn sub(self, rhs: DaysSpan) -> DaysSpan {
        DaysSpan(self.0 - rhs.0)
    }
}

impl Div<i64> for DaysSpan {
    type Output = DaysSpan;
    fn div(self, rhs: i64) -> DaysSpan {
        DaysSpan(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pallet_ceiling_rounds_up() {
        assert_eq!(Units(321.0).pallet_ceiling(320), Pallets(2));
        assert_eq!(Units(320.0).pallet_ceiling(320), Pallets(1));
        assert_eq!(Units(0.0).pallet_ceiling(320), Pallets(0));
    }

    #[test]
    fn two_products_each_just_over_a_pallet_need_four_pallets_not_three() {
        // S5: two 321-unit shipments consume 2 + 2 pallets, not ceil(642/320) = 3.
        let a = Units(321.0).pallet_ceiling(320);
        let b = Units(321.0).pallet_ceiling(320);
        assert_eq!(a + b, Pallets(4));
    }

    #[test]
    fn days_span_exceeds_is_strict() {
        assert!(DaysSpan(18).exceeds(DaysSpan(17)));
        assert!(!DaysSpan(17).exceeds(DaysSpan(17)));
    }
}
