//! Growth scenarios and a runner for projecting several of them at once
//!
//! Each scenario run is an independent pure projection, so batches are
//! spread across threads with rayon.

use crate::projection::{ProjectionEngine, ProjectionError, ProjectionParameters, ProjectionResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named annual growth assumption offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthScenario {
    /// 5% a year
    Base,
    /// 10% a year
    Bull,
    /// Flat
    Bear,
}

impl GrowthScenario {
    pub const ALL: [GrowthScenario; 3] = [GrowthScenario::Base, GrowthScenario::Bull, GrowthScenario::Bear];

    /// Annual growth rate applied to every vintage
    pub fn annual_rate(&self) -> f64 {
        match self {
            GrowthScenario::Base => 0.05,
            GrowthScenario::Bull => 0.10,
            GrowthScenario::Bear => 0.00,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GrowthScenario::Base => "Base",
            GrowthScenario::Bull => "Bull",
            GrowthScenario::Bear => "Bear",
        }
    }

    /// Label as shown in the dashboard's scenario selector
    pub fn label(&self) -> &'static str {
        match self {
            GrowthScenario::Base => "Base (5%)",
            GrowthScenario::Bull => "Bull (10%)",
            GrowthScenario::Bear => "Bear (0%)",
        }
    }
}

impl fmt::Display for GrowthScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised scenario name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown growth scenario '{0}' (expected Base, Bull or Bear)")]
pub struct UnknownScenario(pub String);

impl FromStr for GrowthScenario {
    type Err = UnknownScenario;

    /// Accepts the bare name in any case or a selector label such as "Bull (10%)"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        GrowthScenario::ALL
            .into_iter()
            .find(|scenario| lower.contains(&scenario.name().to_ascii_lowercase()))
            .ok_or_else(|| UnknownScenario(s.to_string()))
    }
}

/// Projects one parameter set under several growth scenarios
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_params: ProjectionParameters,
}

impl ScenarioRunner {
    /// Validates the base parameters once; the growth rate is replaced per scenario
    pub fn new(base_params: ProjectionParameters) -> Result<Self, ProjectionError> {
        base_params.validate()?;
        Ok(Self { base_params })
    }

    /// Run a single scenario
    pub fn run(&self, scenario: GrowthScenario) -> ProjectionResult {
        // Named scenario rates are finite and non-negative
        ProjectionEngine::from_validated(self.base_params.clone())
            .with_scenario(scenario)
            .run()
    }

    /// Run several scenarios in parallel, results in input order
    pub fn run_all(&self, scenarios: &[GrowthScenario]) -> Vec<(GrowthScenario, ProjectionResult)> {
        scenarios
            .par_iter()
            .map(|&scenario| (scenario, self.run(scenario)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rates() {
        assert_relative_eq!(GrowthScenario::Base.annual_rate(), 0.05);
        assert_relative_eq!(GrowthScenario::Bull.annual_rate(), 0.10);
        assert_relative_eq!(GrowthScenario::Bear.annual_rate(), 0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("base".parse::<GrowthScenario>().unwrap(), GrowthScenario::Base);
        assert_eq!(" BULL ".parse::<GrowthScenario>().unwrap(), GrowthScenario::Bull);
        assert_eq!("Bear (0%)".parse::<GrowthScenario>().unwrap(), GrowthScenario::Bear);
        for scenario in GrowthScenario::ALL {
            assert_eq!(scenario.label().parse::<GrowthScenario>().unwrap(), scenario);
            assert_eq!(scenario.to_string().parse::<GrowthScenario>().unwrap(), scenario);
        }
        assert!("sideways".parse::<GrowthScenario>().is_err());
    }

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new(ProjectionParameters::reference(GrowthScenario::Base)).unwrap();
        let results = runner.run_all(&GrowthScenario::ALL);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, GrowthScenario::Base);
        assert_eq!(results[1].0, GrowthScenario::Bull);
        assert_eq!(results[2].0, GrowthScenario::Bear);
        for (scenario, result) in &results {
            assert_eq!(result.scenario, Some(*scenario));
            assert_eq!(result.scenario_label(), scenario.label());
        }

        // Higher growth should result in higher final NAV
        let bull = results[1].1.summary().final_adj_nav;
        let base = results[0].1.summary().final_adj_nav;
        let bear = results[2].1.summary().final_adj_nav;
        assert!(bull > base && base > bear);
    }

    #[test]
    fn test_runner_rejects_invalid_base() {
        let mut params = ProjectionParameters::reference(GrowthScenario::Base);
        params.pools.clear();
        assert!(ScenarioRunner::new(params).is_err());
    }
}
