//! AMC NAV CLI
//!
//! Command-line interface for running a single NAV projection

use amc_nav::vintage::load_vintages;
use amc_nav::{GrowthScenario, ProjectionEngine, ProjectionResult, RunConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "amc_nav")]
#[command(about = "Project the NAV of a carbon-credit backed certificate")]
struct Args {
    /// JSON run configuration (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV of vintages (Vintage,Volume,Price) replacing the configured ones
    #[arg(long)]
    vintages: Option<PathBuf>,

    /// Growth scenario: Base, Bull or Bear
    #[arg(long)]
    scenario: Option<GrowthScenario>,

    /// Explicit annual growth rate as a decimal, overriding the scenario
    #[arg(long)]
    growth_rate: Option<f64>,

    /// Performance fee (%)
    #[arg(long)]
    fee_pct: Option<f64>,

    /// Hurdle rate (%)
    #[arg(long)]
    hurdle_pct: Option<f64>,

    /// Annual redemption rate (%)
    #[arg(long)]
    redemption_pct: Option<f64>,

    /// Base-year unit prices, comma-separated, one per vintage
    #[arg(long, value_delimiter = ',')]
    prices: Option<Vec<f64>>,

    /// First projected year
    #[arg(long)]
    base_year: Option<i32>,

    /// Number of projected years
    #[arg(long)]
    years: Option<u32>,

    /// Write the NAV table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Config file (or defaults) with command-line overrides applied
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RunConfig::default(),
        };

        if let Some(scenario) = self.scenario {
            config.scenario = scenario;
        }
        if self.growth_rate.is_some() {
            config.growth_rate = self.growth_rate;
        }
        if let Some(fee_pct) = self.fee_pct {
            config.fee_pct = fee_pct;
        }
        if let Some(hurdle_pct) = self.hurdle_pct {
            config.hurdle_pct = hurdle_pct;
        }
        if let Some(redemption_pct) = self.redemption_pct {
            config.redemption_pct = redemption_pct;
        }
        if let Some(prices) = &self.prices {
            config.prices = prices.clone();
        }
        if let Some(base_year) = self.base_year {
            config.base_year = base_year;
        }
        if let Some(years) = self.years {
            config.horizon_years = years;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.run_config()?;
    let params = match &args.vintages {
        Some(path) => {
            let pools = load_vintages(path)
                .with_context(|| format!("Failed to load vintages {}", path.display()))?;
            config.parameters_for(pools)?
        }
        None => config.to_parameters()?,
    };

    let mut engine = ProjectionEngine::new(params)?;
    if let Some(scenario) = config.named_scenario() {
        engine = engine.with_scenario(scenario);
    }
    let result = engine.run();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table(&config, &result);
    }

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        result.write_csv(file)?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}

fn print_table(config: &RunConfig, result: &ProjectionResult) {
    println!("Carbon AMC NAV Projection");
    println!("=========================\n");
    println!("Growth: {}", result.scenario_label());
    println!(
        "Performance fee: {}%  Hurdle: {}%  Redemptions: {}%\n",
        config.fee_pct, config.hurdle_pct, config.redemption_pct
    );

    let labels: Vec<String> = result
        .records
        .first()
        .map(|r| r.vintage_navs.iter().map(|v| format!("{} NAV", v.label)).collect())
        .unwrap_or_default();

    print!("{:>6}", "Year");
    for label in &labels {
        print!(" {:>12}", label);
    }
    println!(" {:>14} {:>16} {:>14}", "Total NAV", "Perf Fee Adj NAV", "Final Adj NAV");
    println!("{}", "-".repeat(6 + 13 * labels.len() + 47));

    for record in &result.records {
        print!("{:>6}", record.year);
        for vintage in &record.vintage_navs {
            print!(" {:>12.0}", vintage.nav);
        }
        println!(
            " {:>14.0} {:>16.2} {:>14.2}",
            record.total_nav, record.fee_adj_nav, record.final_adj_nav
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years: {} ({}-{})", summary.total_years, summary.first_year, summary.last_year);
    println!("  Initial NAV: ${:.2}", summary.initial_nav);
    println!("  Final Gross NAV: ${:.2}", summary.final_gross_nav);
    println!("  Total Performance Fees: ${:.2}", summary.total_performance_fees);
    println!("  Fee Drag: ${:.2}", summary.fee_drag);
    println!("  Redemption Drag: ${:.2}", summary.redemption_drag);
    println!("  Final Adj NAV: ${:.2}", summary.final_adj_nav);
}
