use super::space::AxisStencil;
use crate::discretization::grid::NUM_DIMENSIONS;
use crate::error::PressureError;
use crate::flow::{Scan, ThresholdCriteria};
use nalgebra::Matrix3;

/// Storage slot of the symmetric component `R(row, col)`.
pub fn reynolds_stress_index(row: usize, col: usize) -> usize {
    let (a, b) = if row <= col { (row, col) } else { (col, row) };
    match (a, b) {
        (0, 0) => 0,
        (0, 1) => 1,
        (0, 2) => 2,
        (1, 1) => 3,
        (1, 2) => 4,
        _ => 5,
    }
}

/// `G[(a, b)] = dR(a, b)/dx_a`; summing a column gives the divergence of
/// the stress tensor for that momentum component.
pub fn eval_reynolds_stress_gradient(
    scan: &Scan,
    cell: usize,
    mask: &ThresholdCriteria,
) -> Result<Matrix3<f64>, PressureError> {
    scan.cell(cell)?;
    let mut gradient = Matrix3::zeros();
    for axis in 0..NUM_DIMENSIONS {
        let stencil = AxisStencil::new(scan, cell, axis, mask);
        for comp in 0..NUM_DIMENSIONS {
            let slot = reynolds_stress_index(axis, comp);
            gradient[(axis, comp)] = stencil.first(|idx| scan.cells[idx].reynolds_stress[slot])?;
        }
    }
    Ok(gradient)
}
