//! AMC NAV - projection engine for carbon-credit backed certificates
//!
//! This library provides:
//! - Vintage pool definitions and CSV loading
//! - Year-by-year NAV projection (gross, after performance fee, after redemptions)
//! - Named growth scenarios and a parallel scenario runner
//! - JSON run configuration in dashboard units (percent sliders)

pub mod vintage;
pub mod projection;
pub mod scenario;
pub mod config;

// Re-export commonly used types
pub use vintage::VintagePool;
pub use projection::{
    project, ProjectionEngine, ProjectionError, ProjectionParameters, ProjectionResult,
    YearRecord,
};
pub use scenario::{GrowthScenario, ScenarioRunner};
pub use config::{parse_scenarios, LoadError, RunConfig};
