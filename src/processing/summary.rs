use crate::config::PressureConfig;
use crate::flow::{Quantity, Sequence};
use crate::physics::momentum::{PressureFormula, ReynoldsStressPolicy};
use crate::pressure::ReconstructionReport;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub struct ScanSummary {
    pub scan_time: f64,
    pub gradient_cells: usize,
    pub components: usize,
    pub visited_cells: usize,
    pub eligible_cells: usize,
    pub min_pressure: f64,
    pub max_pressure: f64,
    pub max_gradient: f64,
    pub final_smoothing_change: Option<f64>,
}

pub struct ReconstructionSummary {
    // Grid info
    pub cell_totals: [usize; 3],
    pub domain_min: [f64; 3],
    pub domain_max: [f64; 3],
    pub min_cell_length: f64,
    pub max_cell_length: f64,

    // Physics info
    pub viscosity: f64,
    pub density: f64,
    pub formula: PressureFormula,
    pub reynolds_stress: ReynoldsStressPolicy,
    pub cyclic: bool,

    pub scans: Vec<ScanSummary>,
}

impl ReconstructionSummary {
    pub fn from_run(
        sequence: &Sequence,
        config: &PressureConfig,
        reports: &[ReconstructionReport],
    ) -> Self {
        let (cell_totals, domain_min, domain_max, min_len, max_len) = match sequence.scans().first()
        {
            Some(scan) => {
                let grid = scan.grid();
                let lengths = (0..3).flat_map(|axis| grid.cell_lengths(axis)).copied();
                (
                    grid.cell_totals(),
                    grid.domain_min(),
                    grid.domain_max(),
                    lengths.clone().fold(f64::INFINITY, f64::min),
                    lengths.fold(0.0, f64::max),
                )
            }
            None => ([0; 3], [0.0; 3], [0.0; 3], 0.0, 0.0),
        };

        let scans = sequence
            .scans()
            .iter()
            .zip(reports)
            .map(|(scan, report)| {
                let (min_pressure, max_pressure) = (0..scan.total_cells())
                    .filter(|&idx| scan.is_inner_cell(idx))
                    .map(|idx| scan.cells()[idx].relative_pressure)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                        (lo.min(p), hi.max(p))
                    });
                let flood = &report.pressure.flood_fill;
                ScanSummary {
                    scan_time: scan.scan_time,
                    gradient_cells: report.gradient_cells,
                    components: flood.components,
                    visited_cells: flood.visited_cells,
                    eligible_cells: flood.eligible_cells,
                    min_pressure,
                    max_pressure,
                    max_gradient: scan.max_quantity(Quantity::PressureGradientModulus),
                    final_smoothing_change: report
                        .pressure
                        .smoothing
                        .as_ref()
                        .and_then(|s| s.max_relative_change.last().copied()),
                }
            })
            .collect();

        Self {
            cell_totals,
            domain_min,
            domain_max,
            min_cell_length: min_len,
            max_cell_length: max_len,
            viscosity: config.material.viscosity,
            density: config.material.density,
            formula: config.momentum.formula,
            reynolds_stress: config.momentum.reynolds_stress,
            cyclic: sequence.is_cyclic(),
            scans,
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;

        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file, "RELATIVE PRESSURE RECONSTRUCTION SUMMARY")?;
        writeln!(file, "{}", "=".repeat(60))?;
        writeln!(file)?;

        writeln!(file, "GRID")?;
        writeln!(file, "{}", "-".repeat(60))?;
        let [nx, ny, nz] = self.cell_totals;
        writeln!(file, "Cells:               {nx} x {ny} x {nz}")?;
        for (axis, name) in ["x", "y", "z"].iter().enumerate() {
            writeln!(
                file,
                "Extent {name}:            {:.6e} to {:.6e} m",
                self.domain_min[axis], self.domain_max[axis]
            )?;
        }
        writeln!(file, "Min cell length:     {:.6e} m", self.min_cell_length)?;
        writeln!(file, "Max cell length:     {:.6e} m", self.max_cell_length)?;
        writeln!(file)?;

        writeln!(file, "PHYSICS")?;
        writeln!(file, "{}", "-".repeat(60))?;
        writeln!(file, "Viscosity:           {:.6e} Pa s", self.viscosity)?;
        writeln!(file, "Density:             {:.6e} kg/m^3", self.density)?;
        writeln!(file, "Formula:             {:?}", self.formula)?;
        writeln!(file, "Reynolds stress:     {:?}", self.reynolds_stress)?;
        writeln!(file, "Cyclic sequence:     {}", self.cyclic)?;
        writeln!(file)?;

        writeln!(file, "SCANS")?;
        writeln!(file, "{}", "-".repeat(60))?;
        for (i, scan) in self.scans.iter().enumerate() {
            writeln!(file, "Scan {i} (t = {:.6e} s):", scan.scan_time)?;
            writeln!(file, "  Gradient cells:    {}", scan.gradient_cells)?;
            writeln!(
                file,
                "  Integrated:        {}/{} cells in {} component(s)",
                scan.visited_cells, scan.eligible_cells, scan.components
            )?;
            writeln!(
                file,
                "  Pressure range:    {:.6e} to {:.6e} Pa",
                scan.min_pressure, scan.max_pressure
            )?;
            writeln!(file, "  Max |grad p|:      {:.6e} Pa/m", scan.max_gradient)?;
            if let Some(change) = scan.final_smoothing_change {
                writeln!(file, "  Last smoothing:    {:.6e}", change)?;
            }
        }
        writeln!(file)?;
        writeln!(file, "{}", "=".repeat(60))?;

        Ok(())
    }

    pub fn print_to_console(&self) {
        println!("\n{}", "=".repeat(60));
        println!("RECONSTRUCTION SUMMARY");
        println!("{}", "=".repeat(60));
        let [nx, ny, nz] = self.cell_totals;
        println!("Grid:          {nx} x {ny} x {nz} cells");
        println!("Scans:         {} (cyclic: {})", self.scans.len(), self.cyclic);
        println!("Formula:       {:?}", self.formula);
        for (i, scan) in self.scans.iter().enumerate() {
            println!(
                "Scan {:>3}:      dp = {:.3e} Pa, {} component(s)",
                i,
                scan.max_pressure - scan.min_pressure,
                scan.components
            );
        }
        println!("{}\n", "=".repeat(60));
    }
}
