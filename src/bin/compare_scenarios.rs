//! Compare Base, Bull and Bear growth scenarios for one parameter set
//!
//! Usage: cargo run --bin compare_scenarios -- [--config run.json] [--scenarios bull,bear] [--output scenarios.csv]

use amc_nav::vintage::load_vintages;
use amc_nav::{parse_scenarios, RunConfig, ScenarioRunner};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "compare_scenarios")]
#[command(about = "Project the certificate NAV under every growth scenario")]
struct Args {
    /// JSON run configuration; its scenario and growth rate are ignored
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV of vintages (Vintage,Volume,Price) replacing the configured ones
    #[arg(long)]
    vintages: Option<PathBuf>,

    /// Scenarios to compare, comma-separated (default: Base, Bull and Bear)
    #[arg(long, value_delimiter = ',')]
    scenarios: Vec<String>,

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

    /// Write per-scenario summaries to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    config.growth_rate = None;
    if let Some(fee_pct) = args.fee_pct {
        config.fee_pct = fee_pct;
    }
    if let Some(hurdle_pct) = args.hurdle_pct {
        config.hurdle_pct = hurdle_pct;
    }
    if let Some(redemption_pct) = args.redemption_pct {
        config.redemption_pct = redemption_pct;
    }
    if let Some(prices) = &args.prices {
        config.prices = prices.clone();
    }
    if let Some(base_year) = args.base_year {
        config.base_year = base_year;
    }
    if let Some(years) = args.years {
        config.horizon_years = years;
    }

    let scenarios = parse_scenarios(&args.scenarios)?;
    let params = match &args.vintages {
        Some(path) => {
            let pools = load_vintages(path)
                .with_context(|| format!("Failed to load vintages {}", path.display()))?;
            config.parameters_for(pools)?
        }
        None => config.to_parameters()?,
    };
    let runner = ScenarioRunner::new(params)?;

    let start = Instant::now();
    let results = runner.run_all(&scenarios);
    log::info!("Projected {} scenarios in {:?}", results.len(), start.elapsed());

    println!(
        "{:<12} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Scenario", "Gross NAV", "Fees", "Fee Adj NAV", "Redemptions", "Final Adj NAV"
    );
    println!("{}", "-".repeat(87));
    for (_, result) in &results {
        let s = result.summary();
        println!(
            "{:<12} {:>14.0} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            result.scenario_label(),
            s.final_gross_nav,
            s.total_performance_fees,
            s.final_fee_adj_nav,
            s.redemption_drag,
            s.final_adj_nav,
        );
    }

    if let Some(path) = &args.output {
        let mut file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        writeln!(file, "Scenario,GrowthRate,FinalGrossNAV,TotalPerfFees,FinalFeeAdjNAV,RedemptionDrag,FinalAdjNAV")?;
        for (scenario, result) in &results {
            let s = result.summary();
            writeln!(
                file,
                "{},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2}",
                scenario,
                result.growth_rate,
                s.final_gross_nav,
                s.total_performance_fees,
                s.final_fee_adj_nav,
                s.redemption_drag,
                s.final_adj_nav,
            )?;
        }
        println!("\nScenario summaries written to: {}", path.display());
    }

    Ok(())
}
