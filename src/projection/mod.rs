//! NAV projection: per-vintage growth, performance fee and redemption chains

mod params;
mod chain;
mod engine;
mod records;

pub use params::{
    ProjectionError, ProjectionParameters, year_range,
    DEFAULT_BASE_YEAR, DEFAULT_FEE_RATE, DEFAULT_HORIZON_YEARS, DEFAULT_HURDLE_RATE,
    DEFAULT_REDEMPTION_RATE,
};
pub use chain::{ChainState, FeeOutcome, apply_performance_fee, apply_redemption};
pub use engine::{ProjectionEngine, project, round_nav};
pub use records::{ProjectionResult, ProjectionSummary, VintageNav, YearRecord};
