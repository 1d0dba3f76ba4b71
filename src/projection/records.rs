//! Projection output structures

use crate::scenario::GrowthScenario;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// NAV contribution of one vintage in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VintageNav {
    pub label: String,
    pub nav: f64,
}

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,

    /// Rounded NAV per vintage, in pool order
    pub vintage_navs: Vec<VintageNav>,

    /// Gross NAV: sum of the rounded vintage NAVs
    pub total_nav: f64,

    /// Fee deducted this year
    pub performance_fee: f64,

    /// NAV after performance fee
    pub fee_adj_nav: f64,

    /// NAV after performance fee and redemptions
    pub final_adj_nav: f64,
}

impl YearRecord {
    /// NAV contribution of the vintage with the given label
    pub fn vintage_nav(&self, label: &str) -> Option<f64> {
        self.vintage_navs
            .iter()
            .find(|v| v.label == label)
            .map(|v| v.nav)
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Named scenario behind the growth rate, if any
    pub scenario: Option<GrowthScenario>,

    /// Growth rate the run used
    pub growth_rate: f64,

    /// Yearly rows, base year first
    pub records: Vec<YearRecord>,
}

impl ProjectionResult {
    pub fn new(growth_rate: f64, records: Vec<YearRecord>) -> Self {
        Self {
            scenario: None,
            growth_rate,
            records,
        }
    }

    pub fn with_scenario(mut self, scenario: Option<GrowthScenario>) -> Self {
        self.scenario = scenario;
        self
    }

    /// Selector label of the scenario, or the explicit rate for custom runs
    pub fn scenario_label(&self) -> String {
        match self.scenario {
            Some(scenario) => scenario.label().to_string(),
            None => format!("Custom ({:.2}%)", self.growth_rate * 100.0),
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let first = self.records.first();
        let last = self.records.last();

        let last_total = last.map(|r| r.total_nav).unwrap_or(0.0);
        let last_fee_adj = last.map(|r| r.fee_adj_nav).unwrap_or(0.0);
        let last_final = last.map(|r| r.final_adj_nav).unwrap_or(0.0);

        ProjectionSummary {
            total_years: self.records.len() as u32,
            first_year: first.map(|r| r.year).unwrap_or(0),
            last_year: last.map(|r| r.year).unwrap_or(0),
            initial_nav: first.map(|r| r.total_nav).unwrap_or(0.0),
            final_gross_nav: last_total,
            final_fee_adj_nav: last_fee_adj,
            final_adj_nav: last_final,
            total_performance_fees: self.records.iter().map(|r| r.performance_fee).sum(),
            fee_drag: last_total - last_fee_adj,
            redemption_drag: last_fee_adj - last_final,
        }
    }

    /// Write the NAV table as CSV using the dashboard's column names
    ///
    /// Values are written in shortest round-trip form, so adjusted NAVs keep
    /// their full precision.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Year".to_string()];
        if let Some(first) = self.records.first() {
            header.extend(first.vintage_navs.iter().map(|v| format!("{} NAV", v.label)));
        }
        header.extend(
            ["Total NAV", "Perf Fee Adj NAV", "Final Adj NAV"]
                .iter()
                .map(|s| s.to_string()),
        );
        csv_writer.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![record.year.to_string()];
            row.extend(record.vintage_navs.iter().map(|v| v.nav.to_string()));
            row.push(record.total_nav.to_string());
            row.push(record.fee_adj_nav.to_string());
            row.push(record.final_adj_nav.to_string());
            csv_writer.write_record(&row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub first_year: i32,
    pub last_year: i32,
    pub initial_nav: f64,
    pub final_gross_nav: f64,
    pub final_fee_adj_nav: f64,
    pub final_adj_nav: f64,
    pub total_performance_fees: f64,
    /// Gross less fee-adjusted NAV in the last year
    pub fee_drag: f64,
    /// Fee-adjusted less final NAV in the last year
    pub redemption_drag: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(year: i32, navs: &[(&str, f64)], fee: f64, fee_adj: f64, final_adj: f64) -> YearRecord {
        let vintage_navs: Vec<VintageNav> = navs
            .iter()
            .map(|(label, nav)| VintageNav { label: label.to_string(), nav: *nav })
            .collect();
        YearRecord {
            year,
            total_nav: vintage_navs.iter().map(|v| v.nav).sum(),
            vintage_navs,
            performance_fee: fee,
            fee_adj_nav: fee_adj,
            final_adj_nav: final_adj,
        }
    }

    fn sample() -> ProjectionResult {
        ProjectionResult::new(
            0.10,
            vec![
                record(2025, &[("2021", 1000.0), ("2022", 2000.0)], 0.0, 3000.0, 3000.0),
                record(2026, &[("2021", 1100.0), ("2022", 2200.0)], 12.0, 3288.0, 3138.0),
            ],
        )
    }

    #[test]
    fn test_vintage_lookup() {
        let result = sample();
        assert_eq!(result.records[1].vintage_nav("2022"), Some(2200.0));
        assert_eq!(result.records[1].vintage_nav("2030"), None);
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.total_years, 2);
        assert_eq!(summary.first_year, 2025);
        assert_eq!(summary.last_year, 2026);
        assert_relative_eq!(summary.initial_nav, 3000.0);
        assert_relative_eq!(summary.final_gross_nav, 3300.0);
        assert_relative_eq!(summary.total_performance_fees, 12.0);
        assert_relative_eq!(summary.fee_drag, 12.0);
        assert_relative_eq!(summary.redemption_drag, 150.0);
    }

    #[test]
    fn test_scenario_label() {
        let result = sample();
        assert_eq!(result.scenario_label(), "Custom (10.00%)");

        let result = result.with_scenario(Some(GrowthScenario::Bull));
        assert_eq!(result.scenario_label(), "Bull (10%)");
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        sample().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Year,2021 NAV,2022 NAV,Total NAV,Perf Fee Adj NAV,Final Adj NAV");
        assert_eq!(lines[2], "2026,1100,2200,3300,3288,3138");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_csv_keeps_precision() {
        let result = ProjectionResult::new(
            0.10,
            vec![record(2029, &[("2021", 8_235_563.0)], 33_138.28886, 8_202_424.71114, 6_988_245.72039)],
        );
        let mut buf = Vec::new();
        result.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().nth(1), Some("2029,8235563,8235563,8202424.71114,6988245.72039"));
    }
}
