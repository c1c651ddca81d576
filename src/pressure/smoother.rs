use crate::flow::Scan;
use crate::numerics::MATH_ZERO;

/// Number of relaxation sweeps, independent of the convergence metric.
pub const SMOOTHING_SWEEPS: usize = 11;

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingReport {
    pub sweeps: usize,
    /// Largest relative pressure change seen in each sweep.
    pub max_relative_change: Vec<f64>,
}

/// Relax the relative pressure towards the average of the values predicted
/// from each inner neighbour. Cells are updated in place in index order.
pub fn perform_pressure_iterations(scan: &mut Scan) -> SmoothingReport {
    log::info!("Applying pressure smoothing...");
    let grid = scan.grid.clone();
    let mut history = Vec::with_capacity(SMOOTHING_SWEEPS);

    for sweep in 0..SMOOTHING_SWEEPS {
        let mut max_change: f64 = 0.0;
        for idx in 0..scan.total_cells() {
            if !grid.is_inner_cell(idx) {
                continue;
            }
            let current = &scan.cells[idx];
            let (sum, count) = grid
                .neighbors(idx)
                .into_iter()
                .flatten()
                .filter(|&n| grid.is_inner_cell(n))
                .fold((0.0, 0usize), |(sum, count), n| {
                    let neighbor = &scan.cells[n];
                    let predicted = neighbor.relative_pressure
                        + current.pressure_gradient.dot(neighbor.position - current.position);
                    (sum + predicted, count + 1)
                });
            if count == 0 {
                continue;
            }

            let old = current.relative_pressure;
            let new = 0.5 * old + 0.5 * (sum / count as f64);
            if old.abs() > MATH_ZERO {
                max_change = max_change.max((new - old).abs() / old.abs());
            }
            scan.cells[idx].relative_pressure = new;
        }
        log::info!("Sweep {}: max pressure diff {:.6e}", sweep + 1, max_change);
        history.push(max_change);
    }

    SmoothingReport {
        sweeps: history.len(),
        max_relative_change: history,
    }
}
