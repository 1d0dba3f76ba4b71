//! Vintage pool data structures matching the dashboard's reference portfolio

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Vintage labels of the reference portfolio
pub const REFERENCE_LABELS: [&str; 5] = ["2021", "2022", "2023", "2024", "2025"];

/// Base-year unit prices of the reference portfolio ($/tCO2e)
pub const REFERENCE_PRICES: [f64; 5] = [4.0, 4.2, 4.5, 4.8, 5.0];

/// Credit units held per reference vintage
pub const REFERENCE_VOLUME: f64 = 250_000.0;

/// Price range offered by the dashboard sliders ($/tCO2e)
pub const REFERENCE_PRICE_RANGE: RangeInclusive<f64> = 3.0..=10.0;

/// One annual cohort of credits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VintagePool {
    /// Vintage identifier (usually the issuance year)
    pub label: String,

    /// Credit units in the pool
    pub volume: f64,

    /// Price per unit at the projection base year
    pub unit_price: f64,
}

impl VintagePool {
    pub fn new(label: impl Into<String>, volume: f64, unit_price: f64) -> Self {
        Self {
            label: label.into(),
            volume,
            unit_price,
        }
    }

    /// Pool value at the base year, before rounding
    pub fn base_value(&self) -> f64 {
        self.volume * self.unit_price
    }

    /// Unrounded pool value after `periods` years of compounding growth
    pub fn grown_value(&self, growth_rate: f64, periods: u32) -> f64 {
        self.base_value() * (1.0 + growth_rate).powf(periods as f64)
    }
}

/// The reference portfolio: vintages 2021-2025, 250k units each, default prices
pub fn reference_vintages() -> Vec<VintagePool> {
    reference_vintages_with_prices(&REFERENCE_PRICES)
}

/// Reference labels and volumes with caller-supplied prices
///
/// Prices are paired with labels in order; surplus prices are ignored and
/// missing ones drop the corresponding vintage.
pub fn reference_vintages_with_prices(prices: &[f64]) -> Vec<VintagePool> {
    REFERENCE_LABELS
        .iter()
        .zip(prices)
        .map(|(label, &price)| VintagePool::new(*label, REFERENCE_VOLUME, price))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_vintages() {
        let pools = reference_vintages();
        assert_eq!(pools.len(), 5);
        assert_eq!(pools[0].label, "2021");
        assert_eq!(pools[4].label, "2025");
        assert!(pools.iter().all(|p| p.volume == REFERENCE_VOLUME));
        assert_relative_eq!(pools[1].unit_price, 4.2);
    }

    #[test]
    fn test_reference_prices_within_slider_range() {
        assert!(REFERENCE_PRICES.iter().all(|p| REFERENCE_PRICE_RANGE.contains(p)));
    }

    #[test]
    fn test_grown_value() {
        let pool = VintagePool::new("2021", 1000.0, 4.0);
        assert_relative_eq!(pool.base_value(), 4000.0);
        assert_relative_eq!(pool.grown_value(0.10, 0), 4000.0);
        assert_relative_eq!(pool.grown_value(0.10, 2), 4840.0, max_relative = 1e-12);
    }

    #[test]
    fn test_custom_prices_truncate() {
        let pools = reference_vintages_with_prices(&[6.0, 7.0]);
        assert_eq!(pools.len(), 2);
        assert_relative_eq!(pools[1].unit_price, 7.0);
    }
}
