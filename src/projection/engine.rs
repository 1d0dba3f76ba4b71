//! Core projection engine for yearly NAV projections

use super::chain::ChainState;
use super::params::{ProjectionError, ProjectionParameters};
use super::records::{ProjectionResult, VintageNav, YearRecord};
use crate::scenario::GrowthScenario;

/// Round to the nearest whole currency unit, ties to even
///
/// Applied to each vintage in each year before summation, so gross NAV is a
/// sum of rounded contributions rather than a rounded sum.
pub fn round_nav(value: f64) -> f64 {
    value.round_ties_even()
}

/// Project NAV for every year in `params.years`
///
/// Validates first; an invalid parameter set yields no records at all.
pub fn project(params: &ProjectionParameters) -> Result<Vec<YearRecord>, ProjectionError> {
    params.validate()?;
    Ok(project_validated(params))
}

/// Rounded NAV of every pool after `period` years of growth
fn vintage_navs(params: &ProjectionParameters, period: u32) -> Vec<VintageNav> {
    params
        .pools
        .iter()
        .map(|pool| VintageNav {
            label: pool.label.clone(),
            nav: round_nav(pool.grown_value(params.growth_rate, period)),
        })
        .collect()
}

/// Single left-to-right pass; the accumulator carries the prior year's chain state
fn project_validated(params: &ProjectionParameters) -> Vec<YearRecord> {
    let initial = (Vec::with_capacity(params.years.len()), None::<ChainState>);

    let (records, _) = params.years.iter().enumerate().fold(
        initial,
        |(mut records, prior), (period, &year)| {
            let vintage_navs = vintage_navs(params, period as u32);
            let total_nav: f64 = vintage_navs.iter().map(|v| v.nav).sum();

            let (state, performance_fee) = match prior {
                None => (ChainState::anchor(total_nav), 0.0),
                Some(prior) => prior.advance(
                    total_nav,
                    params.fee_rate,
                    params.hurdle_rate,
                    params.redemption_rate,
                ),
            };

            log::debug!(
                "year {}: gross={:.0} fee={:.2} fee_adj={:.2} final={:.2}",
                year, total_nav, performance_fee, state.fee_adj_nav, state.final_adj_nav
            );

            records.push(YearRecord {
                year,
                vintage_navs,
                total_nav,
                performance_fee,
                fee_adj_nav: state.fee_adj_nav,
                final_adj_nav: state.final_adj_nav,
            });
            (records, Some(state))
        },
    );

    records
}

/// Main projection engine
///
/// Holds a validated parameter set so repeated runs skip validation.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ProjectionParameters,
    scenario: Option<GrowthScenario>,
}

impl ProjectionEngine {
    /// Create a new projection engine, rejecting invalid parameters up front
    pub fn new(params: ProjectionParameters) -> Result<Self, ProjectionError> {
        params.validate()?;
        Ok(Self { params, scenario: None })
    }

    /// Skip validation for parameters derived from an already validated set
    pub(crate) fn from_validated(params: ProjectionParameters) -> Self {
        debug_assert!(params.validate().is_ok());
        Self { params, scenario: None }
    }

    /// Project under a named scenario: its rate replaces the configured growth
    /// rate and its label is carried into the result
    pub fn with_scenario(mut self, scenario: GrowthScenario) -> Self {
        self.params.growth_rate = scenario.annual_rate();
        self.scenario = Some(scenario);
        self
    }

    /// Run the projection
    pub fn run(&self) -> ProjectionResult {
        log::info!(
            "Projecting {} vintages over {} years (growth {:.2}%, fee {:.2}%, hurdle {:.2}%, redemptions {:.2}%)",
            self.params.pools.len(),
            self.params.years.len(),
            self.params.growth_rate * 100.0,
            self.params.fee_rate * 100.0,
            self.params.hurdle_rate * 100.0,
            self.params.redemption_rate * 100.0,
        );
        ProjectionResult::new(self.params.growth_rate, project_validated(&self.params))
            .with_scenario(self.scenario)
    }
}
