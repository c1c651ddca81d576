pub mod flood_fill;
pub mod smoother;

use crate::config::{FilterSettings, PressureConfig};
use crate::error::PressureError;
use crate::flow::{Quantity, Scan, Sequence, ThresholdCriteria};
use crate::numerics::reynolds::eval_reynolds_stress_gradient;
use crate::numerics::space::{eval_space_derivs, eval_space_gradient};
use crate::numerics::time::eval_time_derivs;
use crate::numerics::timing::{Stage, finalize_and_print, record_stage, reset_timing};
use crate::physics::momentum::CellKinematics;
use crate::processing::filter::{FilterReport, apply_neighbor_filter};
use flood_fill::{FloodFillReport, eval_relative_pressure};
use glam::DVec3;
use smoother::{SmoothingReport, perform_pressure_iterations};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq)]
pub struct ScanPressureReport {
    pub flood_fill: FloodFillReport,
    pub smoothing: Option<SmoothingReport>,
}

/// Outcome of [`reconstruct`] for one scan.
#[derive(Clone, Debug, PartialEq)]
pub struct ReconstructionReport {
    pub scan_time: f64,
    pub velocity_filter: Vec<FilterReport>,
    /// Cells that received a pressure gradient.
    pub gradient_cells: usize,
    pub gradient_filter: Vec<FilterReport>,
    pub pressure: ScanPressureReport,
}

/// Cells the gradient drivers write to: inner and not excluded by `mask`.
fn gradient_targets<'a>(
    scan: &'a Scan,
    mask: &'a ThresholdCriteria,
) -> impl Iterator<Item = usize> + 'a {
    (0..scan.total_cells())
        .filter(move |&idx| scan.is_inner_cell(idx) && !mask.meets(&scan.cells[idx]))
}

fn scan_pressure_gradients(
    sequence: &Sequence,
    scan_index: usize,
    config: &PressureConfig,
) -> Result<Vec<(usize, DVec3)>, PressureError> {
    let scan = sequence.scan(scan_index)?;
    let mask = &config.stencil_mask;

    gradient_targets(scan, mask)
        .map(|idx| {
            let space = eval_space_derivs(scan, idx, mask)?;
            let time_deriv = eval_time_derivs(sequence, scan_index, idx)?;
            let stress = if scan.has_reynolds_stress {
                Some(eval_reynolds_stress_gradient(scan, idx, mask)?)
            } else {
                None
            };
            let kinematics = CellKinematics {
                velocity: scan.cells[idx].velocity,
                time_deriv,
                space: &space,
                reynolds_stress_grad: stress.as_ref(),
            };
            Ok((idx, config.momentum.pressure_gradient(&config.material, &kinematics)))
        })
        .collect()
}

/// Assemble the pressure gradient of every scan from the momentum balance.
///
/// Returns the number of cells assigned per scan. Boundary cells and cells
/// excluded by the stencil mask keep whatever gradient they held.
pub fn compute_pressure_gradients(
    sequence: &mut Sequence,
    config: &PressureConfig,
) -> Result<Vec<usize>, PressureError> {
    let mut assigned = Vec::with_capacity(sequence.len());
    for scan_index in 0..sequence.len() {
        let source: &Sequence = sequence;
        let gradients =
            record_stage(Stage::Gradient, || scan_pressure_gradients(source, scan_index, config))?;
        let scan = sequence.scan_mut(scan_index)?;
        for &(idx, gradient) in &gradients {
            scan.cells[idx].pressure_gradient = gradient;
        }
        scan.has_pressure_gradient = true;
        log::info!(
            "Scan {scan_index} (t = {:.4}): pressure gradient on {} cells",
            scan.scan_time,
            gradients.len()
        );
        assigned.push(gradients.len());
    }
    Ok(assigned)
}

/// Store the spatial gradient of `quantity` in the pressure gradient slot, so
/// that integrating it recovers the quantity itself.
pub fn compute_quantity_gradient(
    scan: &mut Scan,
    quantity: Quantity,
    mask: &ThresholdCriteria,
) -> Result<usize, PressureError> {
    let source: &Scan = scan;
    let gradients = gradient_targets(source, mask)
        .map(|idx| Ok((idx, eval_space_gradient(source, idx, quantity, mask)?)))
        .collect::<Result<Vec<_>, PressureError>>()?;
    for &(idx, gradient) in &gradients {
        scan.cells[idx].pressure_gradient = gradient;
    }
    scan.has_pressure_gradient = true;
    Ok(gradients.len())
}

fn scan_relative_pressure(
    scan: &mut Scan,
    config: &PressureConfig,
) -> Result<ScanPressureReport, PressureError> {
    let flood_fill = record_stage(Stage::FloodFill, || {
        eval_relative_pressure(
            scan,
            config.seed,
            config.reference_pressure,
            config.eligibility.as_ref(),
        )
    })?;
    let smoothing = config
        .smoothing
        .then(|| record_stage(Stage::Smoothing, || perform_pressure_iterations(scan)));
    Ok(ScanPressureReport {
        flood_fill,
        smoothing,
    })
}

/// Integrate the stored pressure gradient of every scan.
pub fn compute_relative_pressure(
    sequence: &mut Sequence,
    config: &PressureConfig,
) -> Result<Vec<ScanPressureReport>, PressureError> {
    sequence
        .scans_mut()
        .iter_mut()
        .map(|scan| scan_relative_pressure(scan, config))
        .collect()
}

fn apply_filter_settings(
    scan: &mut Scan,
    settings: Option<&FilterSettings>,
) -> Result<Vec<FilterReport>, PressureError> {
    let Some(settings) = settings else {
        return Ok(Vec::new());
    };
    settings
        .quantities
        .iter()
        .map(|&q| apply_neighbor_filter(scan, q, settings.iterations, settings.mode))
        .collect()
}

/// Run the whole chain: velocity filter, gradient assembly, gradient filter,
/// integration and optional smoothing.
pub fn reconstruct(
    sequence: &mut Sequence,
    config: &PressureConfig,
) -> Result<Vec<ReconstructionReport>, PressureError> {
    reset_timing();
    let start = Instant::now();

    let velocity_filter = sequence
        .scans_mut()
        .iter_mut()
        .map(|scan| apply_filter_settings(scan, config.velocity_filter.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let gradient_cells = compute_pressure_gradients(sequence, config)?;

    let gradient_filter = sequence
        .scans_mut()
        .iter_mut()
        .map(|scan| apply_filter_settings(scan, config.gradient_filter.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let pressure = compute_relative_pressure(sequence, config)?;
    finalize_and_print(start.elapsed());

    let reports = sequence
        .scans()
        .iter()
        .zip(velocity_filter)
        .zip(gradient_cells)
        .zip(gradient_filter)
        .zip(pressure)
        .map(
            |((((scan, velocity_filter), gradient_cells), gradient_filter), pressure)| {
                ReconstructionReport {
                    scan_time: scan.scan_time,
                    velocity_filter,
                    gradient_cells,
                    gradient_filter,
                    pressure,
                }
            },
        )
        .collect();
    Ok(reports)
}
