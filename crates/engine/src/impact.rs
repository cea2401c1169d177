//! Conversion of nature-fund amounts into gamified impact metrics.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::Money;

/// Per-unit costs and rates used to convert an amount into impact units.
///
/// Deserializable so embedders can load them from their configuration
/// source; [`ImpactRates::default`] gives the stock rates.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImpactRates {
    /// Cost of planting one tree.
    pub tree_cost: Money,
    /// Cost of feeding one animal.
    pub meal_cost: Money,
    /// Cost of protecting one habitat.
    pub habitat_cost: Money,
    /// Kilograms of CO2 offset per major currency unit.
    pub co2_kg_per_unit: f64,
}

impl Default for ImpactRates {
    fn default() -> Self {
        Self {
            tree_cost: Money::new(10_00),
            meal_cost: Money::new(5_00),
            habitat_cost: Money::new(25_00),
            co2_kg_per_unit: 2.0,
        }
    }
}

impl ImpactRates {
    /// Converts an amount into impact units.
    ///
    /// Each metric divides the same amount by its own unit cost: the counts
    /// are alternative framings of one donation, not a partition of it, so
    /// `trees * tree_cost + animals_fed * meal_cost` will generally not sum
    /// back to the amount.
    ///
    /// Non-positive amounts yield the all-zero impact; counts are never
    /// negative.
    #[must_use]
    pub fn convert(&self, amount: Money) -> Impact {
        if !amount.is_positive() {
            return Impact::default();
        }

        Impact {
            trees: unit_count(amount, self.tree_cost),
            animals_fed: unit_count(amount, self.meal_cost),
            habitats_protected: unit_count(amount, self.habitat_cost),
            co2_offset_kg: round1(amount.to_major() * self.co2_kg_per_unit),
        }
    }
}

/// Impact units derived from a single amount.
///
/// Transient value object: copied into ledger records and added onto wallet
/// counters, never persisted on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub trees: i64,
    pub animals_fed: i64,
    pub habitats_protected: i64,
    pub co2_offset_kg: f64,
}

impl Impact {
    /// Returns `true` if every metric is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Impact::default()
    }
}

impl Add for Impact {
    type Output = Impact;

    fn add(self, rhs: Impact) -> Self::Output {
        Impact {
            trees: self.trees + rhs.trees,
            animals_fed: self.animals_fed + rhs.animals_fed,
            habitats_protected: self.habitats_protected + rhs.habitats_protected,
            co2_offset_kg: round1(self.co2_offset_kg + rhs.co2_offset_kg),
        }
    }
}

fn unit_count(amount: Money, unit_cost: Money) -> i64 {
    if !unit_cost.is_positive() {
        return 0;
    }
    amount.minor() / unit_cost.minor()
}

/// Rounds to one decimal; CO2 is tracked in tenths of a kilogram.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
