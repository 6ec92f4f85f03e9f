//! Monte-Carlo air-to-ground simulation for AeroLink

use aerolink_core::ModelConfig;
use aerolink_sim::scenarios::{self, ScenarioParams, SimulationReport};
use aerolink_sim::EnvironmentPresets;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

const TRIALS: usize = 200;
const SEED: u64 = 2024;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("{}", "AeroLink Air-to-Ground Simulation".bright_blue().bold());
    println!("{}", "=================================".bright_blue());
    println!();

    let environments = match std::env::args().nth(1) {
        Some(path) => {
            let config = ModelConfig::from_json_file(&path)
                .with_context(|| format!("loading model config from {path}"))?;
            vec![("Custom", config)]
        }
        None => EnvironmentPresets::all(),
    };

    for (name, config) in environments {
        println!("{}", format!("\n>>> Environment: {}", name).bright_green().bold());
        println!("Carrier: {:.2} GHz", config.carrier_frequency / 1e9);
        println!(
            "LOS fit: alpha={} beta={}",
            config.propagation_parameter, config.los_constant
        );
        println!("IoT nodes: {}", config.number_of_iots);

        let progress = ProgressBar::new(TRIALS as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} trials")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let params = ScenarioParams::with_config(config);
        let report = scenarios::run_monte_carlo(params, TRIALS, SEED, Some(progress.clone())).await?;
        progress.finish_and_clear();

        print_report(&report);
        println!("{}", "-".repeat(50));
    }

    println!("\n{}", "All simulations complete!".bright_green().bold());
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!(
        "Trials: {} ({} completed, {} aborted)",
        report.trials, report.completed, report.aborted
    );
    if report.aborted > 0 {
        println!("{}", "Some relays ran out of energy before finishing".bright_red());
    }
    match &report.averages {
        Some(avg) => {
            println!("  - mean AoI: {:.4} s", avg.mean_aoi);
            println!("  - worst AoI: {:.4} s", avg.peak_aoi);
            println!("  - mean channel gain: {:.3e}", avg.mean_channel_gain);
            println!("  - mean IoT energy: {:.3e}", avg.mean_iot_energy);
            println!("  - UAV energy used: {:.1} J", avg.uav_energy_used);
            println!("  - UAV energy left: {:.1} J", avg.residual_energy);
        }
        None => println!("{}", "No trial completed".bright_yellow()),
    }
}
