//! Run configuration in the units the dashboard collects
//!
//! Rates are given in percent and every field falls back to the dashboard
//! default, so `{}` is a complete configuration.

use crate::projection::{
    year_range, ProjectionError, ProjectionParameters, DEFAULT_BASE_YEAR, DEFAULT_HORIZON_YEARS,
};
use crate::scenario::{GrowthScenario, UnknownScenario};
use crate::vintage::{VintagePool, REFERENCE_LABELS, REFERENCE_PRICES, REFERENCE_PRICE_RANGE, REFERENCE_VOLUME};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

/// Performance fee slider range (%)
pub const FEE_PCT_RANGE: RangeInclusive<f64> = 0.0..=20.0;

/// Hurdle rate slider range (%)
pub const HURDLE_PCT_RANGE: RangeInclusive<f64> = 0.0..=10.0;

/// Annual redemption rate slider range (%)
pub const REDEMPTION_PCT_RANGE: RangeInclusive<f64> = 0.0..=20.0;

/// Failure to load inputs or turn them into projection parameters
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{prices} prices supplied for {labels} vintage labels")]
    Mismatch { prices: usize, labels: usize },

    #[error(transparent)]
    UnknownScenario(#[from] UnknownScenario),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// Parse scenario names or selector labels; an empty list means every scenario
pub fn parse_scenarios<S: AsRef<str>>(names: &[S]) -> Result<Vec<GrowthScenario>, LoadError> {
    if names.is_empty() {
        return Ok(GrowthScenario::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| name.as_ref().parse::<GrowthScenario>().map_err(LoadError::from))
        .collect()
}

/// Input configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Named growth scenario (default: Base)
    #[serde(default = "default_scenario")]
    pub scenario: GrowthScenario,

    /// Explicit annual growth rate as a decimal, overriding the scenario
    #[serde(default)]
    pub growth_rate: Option<f64>,

    /// Performance fee (%) (default: 10)
    #[serde(default = "default_fee_pct")]
    pub fee_pct: f64,

    /// Hurdle rate (%) (default: 6)
    #[serde(default = "default_hurdle_pct")]
    pub hurdle_pct: f64,

    /// Annual redemption rate (%) (default: 5)
    #[serde(default = "default_redemption_pct")]
    pub redemption_pct: f64,

    /// Base-year unit price per vintage ($/tCO2e)
    #[serde(default = "default_prices")]
    pub prices: Vec<f64>,

    /// Vintage labels, paired with `prices` by position
    #[serde(default = "default_labels")]
    pub vintage_labels: Vec<String>,

    /// Credit units per vintage (default: 250,000)
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// First projected year (default: 2025)
    #[serde(default = "default_base_year")]
    pub base_year: i32,

    /// Number of projected years (default: 5)
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

fn default_scenario() -> GrowthScenario { GrowthScenario::Base }
fn default_fee_pct() -> f64 { 10.0 }
fn default_hurdle_pct() -> f64 { 6.0 }
fn default_redemption_pct() -> f64 { 5.0 }
fn default_prices() -> Vec<f64> { REFERENCE_PRICES.to_vec() }
fn default_labels() -> Vec<String> { REFERENCE_LABELS.iter().map(|s| s.to_string()).collect() }
fn default_volume() -> f64 { REFERENCE_VOLUME }
fn default_base_year() -> i32 { DEFAULT_BASE_YEAR }
fn default_horizon_years() -> u32 { DEFAULT_HORIZON_YEARS }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
            growth_rate: None,
            fee_pct: default_fee_pct(),
            hurdle_pct: default_hurdle_pct(),
            redemption_pct: default_redemption_pct(),
            prices: default_prices(),
            vintage_labels: default_labels(),
            volume: default_volume(),
            base_year: default_base_year(),
            horizon_years: default_horizon_years(),
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded run configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The named scenario, unless an explicit growth rate overrides it
    pub fn named_scenario(&self) -> Option<GrowthScenario> {
        match self.growth_rate {
            Some(_) => None,
            None => Some(self.scenario),
        }
    }

    /// Growth rate actually used: the explicit override, else the scenario's
    pub fn effective_growth_rate(&self) -> f64 {
        self.growth_rate.unwrap_or_else(|| self.scenario.annual_rate())
    }

    /// Pools built from `vintage_labels`, `prices` and `volume`
    pub fn pools(&self) -> Result<Vec<VintagePool>, LoadError> {
        if self.prices.len() != self.vintage_labels.len() {
            return Err(LoadError::Mismatch {
                prices: self.prices.len(),
                labels: self.vintage_labels.len(),
            });
        }

        Ok(self
            .vintage_labels
            .iter()
            .zip(&self.prices)
            .map(|(label, &price)| VintagePool::new(label.as_str(), self.volume, price))
            .collect())
    }

    /// Validated projection parameters using the configured vintages
    pub fn to_parameters(&self) -> Result<ProjectionParameters, LoadError> {
        let pools = self.pools()?;
        self.parameters_for(pools)
    }

    /// Validated projection parameters for externally supplied vintages
    pub fn parameters_for(&self, pools: Vec<VintagePool>) -> Result<ProjectionParameters, LoadError> {
        self.warn_outside_slider_ranges(&pools);

        let params = ProjectionParameters {
            pools,
            growth_rate: self.effective_growth_rate(),
            fee_rate: self.fee_pct / 100.0,
            hurdle_rate: self.hurdle_pct / 100.0,
            redemption_rate: self.redemption_pct / 100.0,
            years: year_range(self.base_year, self.horizon_years)?,
        };
        params.validate()?;
        Ok(params)
    }

    /// Values the dashboard could not produce are projected anyway, with a warning
    fn warn_outside_slider_ranges(&self, pools: &[VintagePool]) {
        let checks = [
            ("fee", self.fee_pct, &FEE_PCT_RANGE),
            ("hurdle", self.hurdle_pct, &HURDLE_PCT_RANGE),
            ("redemption", self.redemption_pct, &REDEMPTION_PCT_RANGE),
        ];
        for (name, value, range) in checks {
            if !range.contains(&value) {
                log::warn!(
                    "{} rate {}% is outside the usual {}-{}% range",
                    name, value, range.start(), range.end()
                );
            }
        }

        for pool in pools {
            if !REFERENCE_PRICE_RANGE.contains(&pool.unit_price) {
                log::warn!(
                    "vintage {} price {} is outside the usual {}-{} range",
                    pool.label, pool.unit_price, REFERENCE_PRICE_RANGE.start(), REFERENCE_PRICE_RANGE.end()
                );
            }
        }
    }
}
