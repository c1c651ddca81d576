use crate::discretization::grid::NUM_NEIGHBORS;
use crate::error::PressureError;
use crate::flow::{Quantity, Scan};
use crate::numerics::FILTER_ZERO;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    Median,
    Mean,
}

impl FilterMode {
    fn combine(self, values: &mut [f64]) -> f64 {
        match self {
            FilterMode::Mean => values.iter().sum::<f64>() / values.len() as f64,
            FilterMode::Median => {
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    0.5 * (values[mid - 1] + values[mid])
                } else {
                    values[mid]
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterReport {
    /// Largest change in percent of the previous value, one entry per sweep.
    pub max_change_percent: Vec<f64>,
}

/// Replace each inner cell's `quantity` with the median or mean of its face
/// neighbours. All neighbour values are read from the previous sweep.
/// Boundary cells keep their values instead of being zeroed.
pub fn apply_neighbor_filter(
    scan: &mut Scan,
    quantity: Quantity,
    max_iterations: usize,
    mode: FilterMode,
) -> Result<FilterReport, PressureError> {
    if quantity.is_derived() {
        return Err(PressureError::InvalidQuantity(format!(
            "cannot filter derived quantity {quantity}"
        )));
    }

    let grid = scan.grid.clone();
    let mut report = FilterReport::default();
    let mut neighbors = Vec::with_capacity(NUM_NEIGHBORS);

    for iteration in 0..max_iterations {
        let previous = scan.quantity_values(quantity);
        let mut max_change: f64 = 0.0;

        for (idx, &old) in previous.iter().enumerate() {
            if !grid.is_inner_cell(idx) {
                continue;
            }
            neighbors.clear();
            neighbors.extend(grid.neighbors(idx).into_iter().flatten().map(|n| previous[n]));
            let new = mode.combine(&mut neighbors);

            if old.abs() > FILTER_ZERO {
                max_change = max_change.max(100.0 * ((new - old) / old).abs());
            }
            scan.cells[idx].set(quantity, new)?;
        }

        log::info!(
            "{quantity} filter iteration {}/{max_iterations}: max change {max_change:.3}%",
            iteration + 1
        );
        report.max_change_percent.push(max_change);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::generator::create_uniform_grid;
    use glam::DVec3;
    use std::sync::Arc;

    fn scan() -> Scan {
        let grid = Arc::new(create_uniform_grid([5, 5, 5], [0.0; 3], [1.0; 3]).unwrap());
        Scan::new(grid, 0.0).with_flow(|_| (DVec3::new(2.0, 0.0, 0.0), 1.0))
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        assert_eq!(FilterMode::Median.combine(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(FilterMode::Median.combine(&mut [5.0, 1.0, 3.0]), 3.0);
        assert_eq!(FilterMode::Mean.combine(&mut [1.0, 2.0, 6.0]), 3.0);
    }

    #[test]
    fn spike_is_removed_by_median() {
        let mut s = scan();
        let centre = s.grid.coords_to_index(2, 2, 2);
        s.cells[centre].velocity.x = 100.0;
        let report =
            apply_neighbor_filter(&mut s, Quantity::VelocityX, 1, FilterMode::Median).unwrap();
        assert_eq!(s.cells[centre].velocity.x, 2.0);
        assert!((report.max_change_percent[0] - 98.0).abs() < 1e-12);
    }

    #[test]
    fn constant_field_is_unchanged() {
        let mut s = scan();
        let before = s.quantity_values(Quantity::VelocityX);
        for mode in [FilterMode::Median, FilterMode::Mean] {
            let report = apply_neighbor_filter(&mut s, Quantity::VelocityX, 3, mode).unwrap();
            assert_eq!(report.max_change_percent, vec![0.0; 3]);
        }
        assert_eq!(s.quantity_values(Quantity::VelocityX), before);
    }

    #[test]
    fn boundary_cells_are_untouched() {
        let mut s = scan();
        s.cells[0].velocity.x = -7.0;
        apply_neighbor_filter(&mut s, Quantity::VelocityX, 2, FilterMode::Mean).unwrap();
        assert_eq!(s.cells[0].velocity.x, -7.0);
    }

    #[test]
    fn derived_quantity_is_rejected_before_any_change() {
        let mut s = scan();
        let before = s.cells.clone();
        let err = apply_neighbor_filter(&mut s, Quantity::VelocityModulus, 1, FilterMode::Mean);
        assert!(matches!(err, Err(PressureError::InvalidQuantity(_))));
        assert_eq!(s.cells, before);
    }
}
