//! Projection inputs and their validation

use crate::scenario::GrowthScenario;
use crate::vintage::{reference_vintages, VintagePool};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Default performance fee of the reference policy (10%)
pub const DEFAULT_FEE_RATE: f64 = 0.10;

/// Default hurdle rate of the reference policy (6%)
pub const DEFAULT_HURDLE_RATE: f64 = 0.06;

/// Default annual redemption rate of the reference policy (5%)
pub const DEFAULT_REDEMPTION_RATE: f64 = 0.05;

/// Default base year of the reference policy
pub const DEFAULT_BASE_YEAR: i32 = 2025;

/// Default number of projected years
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Failure of a projection run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid projection parameters: {0}")]
    InvalidParameters(String),
}

fn invalid(msg: impl Into<String>) -> ProjectionError {
    ProjectionError::InvalidParameters(msg.into())
}

/// Full input set for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Vintage pools, in output column order
    pub pools: Vec<VintagePool>,

    /// Annual growth applied to every pool
    pub growth_rate: f64,

    /// Share of the gain above the hurdle taken as performance fee
    pub fee_rate: f64,

    /// Growth over the prior adjusted NAV that must be exceeded before a fee applies
    pub hurdle_rate: f64,

    /// Share of the carried NAV base redeemed each year
    pub redemption_rate: f64,

    /// Consecutive projection years; the first is the base year
    pub years: Vec<i32>,
}

impl ProjectionParameters {
    /// Dashboard defaults: reference vintages, 10% fee, 6% hurdle, 5% redemptions, 2025-2029
    pub fn reference(scenario: GrowthScenario) -> Self {
        Self {
            pools: reference_vintages(),
            growth_rate: scenario.annual_rate(),
            fee_rate: DEFAULT_FEE_RATE,
            hurdle_rate: DEFAULT_HURDLE_RATE,
            redemption_rate: DEFAULT_REDEMPTION_RATE,
            years: (DEFAULT_BASE_YEAR..).take(DEFAULT_HORIZON_YEARS as usize).collect(),
        }
    }

    pub fn base_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    /// Check every input constraint; nothing is projected unless this passes
    ///
    /// A redemption rate of 1 or more would wipe out the carried base in a single
    /// year, so it is rejected rather than projected.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.years.is_empty() {
            return Err(invalid("years must not be empty"));
        }
        for pair in self.years.windows(2) {
            if pair[0].checked_add(1) != Some(pair[1]) {
                return Err(invalid(format!(
                    "years must be consecutive and strictly increasing, found {} after {}",
                    pair[1], pair[0]
                )));
            }
        }

        if self.pools.is_empty() {
            return Err(invalid("at least one vintage pool is required"));
        }
        let mut labels = HashSet::new();
        for pool in &self.pools {
            if !labels.insert(pool.label.as_str()) {
                return Err(invalid(format!("duplicate vintage label '{}'", pool.label)));
            }
            if !pool.volume.is_finite() || pool.volume < 0.0 {
                return Err(invalid(format!(
                    "vintage '{}' volume must be finite and non-negative, got {}",
                    pool.label, pool.volume
                )));
            }
            if !pool.unit_price.is_finite() || pool.unit_price <= 0.0 {
                return Err(invalid(format!(
                    "vintage '{}' unit price must be finite and positive, got {}",
                    pool.label, pool.unit_price
                )));
            }
        }

        check_rate("growth rate", self.growth_rate, None)?;
        check_rate("fee rate", self.fee_rate, Some((1.0, true)))?;
        check_rate("hurdle rate", self.hurdle_rate, None)?;
        check_rate("redemption rate", self.redemption_rate, Some((1.0, false)))?;

        Ok(())
    }
}

/// `upper` is `(bound, inclusive)`
fn check_rate(name: &str, value: f64, upper: Option<(f64, bool)>) -> Result<(), ProjectionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("{name} must be finite and non-negative, got {value}")));
    }
    match upper {
        Some((bound, true)) if value > bound => {
            Err(invalid(format!("{name} must not exceed {bound}, got {value}")))
        }
        Some((bound, false)) if value >= bound => {
            Err(invalid(format!("{name} must be below {bound}, got {value}")))
        }
        _ => Ok(()),
    }
}

/// `count` consecutive years starting at `base_year`
///
/// Fails when the last year would not fit in an `i32`.
pub fn year_range(base_year: i32, count: u32) -> Result<Vec<i32>, ProjectionError> {
    let overflow = || invalid(format!("{count} years from {base_year} exceed the supported year range"));
    let span = i32::try_from(count).map_err(|_| overflow())?;
    if span > 0 {
        base_year.checked_add(span - 1).ok_or_else(overflow)?;
    }
    Ok((0..span).map(|offset| base_year + offset).collect())
}
