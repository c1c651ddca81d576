use glam::DVec3;
use relpress_rs::discretization::generator::create_stretched_grid;
use relpress_rs::flow::{Criterion, Quantity, Scan, Sequence, ThresholdCriteria};
use relpress_rs::physics::Material;
use relpress_rs::processing::csv_writer;
use relpress_rs::processing::filter::FilterMode;
use relpress_rs::processing::summary::ReconstructionSummary;
use relpress_rs::{FilterSettings, PressureConfig, PressureError, reconstruct};
use std::f64::consts::TAU;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

const OUTPUT_DIR: &str = "output/main";
const NUM_SCANS: usize = 8;
const PERIOD: f64 = 0.8;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match PressureConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => default_config(),
    };

    if let Err(e) = fs::create_dir_all(OUTPUT_DIR) {
        eprintln!("Failed to create output directory: {e}");
        return ExitCode::FAILURE;
    }

    let mut sequence = match pulsatile_duct() {
        Ok(sequence) => sequence,
        Err(e) => {
            eprintln!("Failed to build input sequence: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Running pressure reconstruction on {} scans...", sequence.len());
    let reports = match reconstruct(&mut sequence, &config) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Reconstruction failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (i, scan) in sequence.scans().iter().enumerate() {
        let path = format!("{OUTPUT_DIR}/pressure_{i:02}.csv");
        if let Err(e) = csv_writer::write_scan_quantities(&path, scan, &Quantity::ALL) {
            eprintln!("Failed to write {path}: {e}");
            return ExitCode::FAILURE;
        }
    }
    println!("Pressure fields saved to {OUTPUT_DIR}/pressure_*.csv");

    let summary = ReconstructionSummary::from_run(&sequence, &config, &reports);
    let summary_path = format!("{OUTPUT_DIR}/reconstruction_summary.txt");
    if let Err(e) = summary.write_to_file(&summary_path) {
        eprintln!("Failed to write summary: {e}");
        return ExitCode::FAILURE;
    }
    summary.print_to_console();
    println!("Summary saved to {summary_path}");

    ExitCode::SUCCESS
}

fn default_config() -> PressureConfig {
    PressureConfig {
        material: Material::blood(),
        eligibility: Some(ThresholdCriteria::new(
            Quantity::Concentration,
            Criterion::GreaterThan,
            0.5,
        )),
        smoothing: true,
        gradient_filter: Some(FilterSettings::pressure_gradient(1, FilterMode::Median)),
        ..PressureConfig::default()
    }
}

/// Pulsatile Poiseuille flow in a rectangular duct on a grid refined towards
/// the lower wall, sampled over one cardiac cycle.
fn pulsatile_duct() -> Result<Sequence, PressureError> {
    let grid = Arc::new(create_stretched_grid(
        [24, 20, 12],
        [2.0e-3, 5.0e-4, 1.0e-3],
        [1.0, 1.04, 1.0],
        [0.0; 3],
    )?);
    let (y_min, y_max) = (grid.domain_min()[1], grid.domain_max()[1]);
    let y_mid = 0.5 * (y_min + y_max);
    let half_height = 0.4 * (y_max - y_min);
    let peak_velocity = 0.5;

    let mut sequence = Sequence::new(true);
    for s in 0..NUM_SCANS {
        let t = s as f64 * PERIOD / NUM_SCANS as f64;
        let amplitude = peak_velocity * (1.0 + 0.4 * (TAU * t / PERIOD).sin());
        let scan = Scan::new(grid.clone(), t).with_flow(|p| {
            let eta = (p.y - y_mid) / half_height;
            if eta.abs() < 1.0 {
                (DVec3::new(amplitude * (1.0 - eta * eta), 0.0, 0.0), 1.0)
            } else {
                (DVec3::ZERO, 0.0)
            }
        });
        sequence.add_scan(scan)?;
    }
    Ok(sequence)
}
