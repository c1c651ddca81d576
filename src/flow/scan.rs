use super::cell::Cell;
use super::quantity::Quantity;
use crate::discretization::grid::GridTopology;
use crate::error::PressureError;
use glam::DVec3;
use std::sync::Arc;

/// One time sample: a full grid of cells at `scan_time`.
///
/// The cell array always holds `grid.total_cells()` entries; outside the
/// crate it is only reachable as a slice.
#[derive(Clone, Debug)]
pub struct Scan {
    pub(crate) grid: Arc<GridTopology>,
    pub(crate) cells: Vec<Cell>,
    pub scan_time: f64,
    pub has_reynolds_stress: bool,
    pub has_pressure_gradient: bool,
    pub has_relative_pressure: bool,
}

impl Scan {
    /// Create a scan with zeroed cells placed at the grid cell centres.
    pub fn new(grid: Arc<GridTopology>, scan_time: f64) -> Self {
        let cells = (0..grid.total_cells())
            .map(|idx| Cell {
                position: grid.cell_center(idx),
                ..Cell::default()
            })
            .collect();
        Self {
            grid,
            cells,
            scan_time,
            has_reynolds_stress: false,
            has_pressure_gradient: false,
            has_relative_pressure: false,
        }
    }

    /// Fill velocity and concentration from a function of position.
    pub fn with_flow(mut self, f: impl Fn(DVec3) -> (DVec3, f64)) -> Self {
        for cell in &mut self.cells {
            let (velocity, concentration) = f(cell.position);
            cell.velocity = velocity;
            cell.concentration = concentration;
        }
        self
    }

    pub fn grid(&self) -> &Arc<GridTopology> {
        &self.grid
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_inner_cell(&self, index: usize) -> bool {
        self.grid.is_inner_cell(index)
    }

    pub fn cell(&self, index: usize) -> Result<&Cell, PressureError> {
        let total = self.cells.len();
        self.cells
            .get(index)
            .ok_or(PressureError::CellOutOfRange { index, total })
    }

    pub fn quantity_values(&self, quantity: Quantity) -> Vec<f64> {
        self.cells.iter().map(|c| c.get(quantity)).collect()
    }

    /// Largest value of `quantity` over all cells.
    pub fn max_quantity(&self, quantity: Quantity) -> f64 {
        self.cells
            .iter()
            .map(|c| c.get(quantity))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_quantity(&self, quantity: Quantity) -> f64 {
        self.cells
            .iter()
            .map(|c| c.get(quantity))
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::generator::create_uniform_grid;

    #[test]
    fn cells_start_at_centres() {
        let grid = Arc::new(create_uniform_grid([2, 2, 2], [0.0; 3], [2.0; 3]).unwrap());
        let scan = Scan::new(grid, 0.5).with_flow(|p| (DVec3::new(p.y, 0.0, 0.0), 1.0));
        assert_eq!(scan.total_cells(), 8);
        assert_eq!(scan.cells[7].position, DVec3::splat(1.5));
        assert_eq!(scan.max_quantity(Quantity::VelocityX), 1.5);
        assert_eq!(scan.min_quantity(Quantity::VelocityX), 0.5);
        assert!(scan.cell(8).is_err());
    }
}
