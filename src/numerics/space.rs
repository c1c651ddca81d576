use crate::discretization::grid::NUM_DIMENSIONS;
use crate::error::PressureError;
use crate::flow::{Quantity, Scan, ThresholdCriteria};
use glam::DVec3;
use nalgebra::Matrix3;

/// First and second spatial velocity derivatives at a cell.
///
/// Row = differentiation axis, column = velocity component, so
/// `first[(1, 0)]` is `du/dy`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpaceDerivatives {
    pub first: Matrix3<f64>,
    pub second: Matrix3<f64>,
}

/// Three-point stencil along one axis with masked neighbours removed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AxisStencil {
    pub cell: usize,
    pub axis: usize,
    pub minus: Option<usize>,
    pub plus: Option<usize>,
    pub delta_minus: f64,
    pub delta_plus: f64,
}

impl AxisStencil {
    /// `mask` marks cells that may not be used as stencil neighbours.
    pub fn new(scan: &Scan, cell: usize, axis: usize, mask: &ThresholdCriteria) -> Self {
        let grid = &scan.grid;
        let coord = grid.index_to_coords(cell)[axis];
        let (minus, plus) = grid.axis_neighbors(cell, axis);
        let valid = |n: Option<usize>| n.filter(|&idx| !mask.meets(&scan.cells[idx]));
        let minus = valid(minus);
        let plus = valid(plus);

        let here = grid.cell_length(axis, coord);
        let delta_minus = minus.map_or(0.0, |_| 0.5 * (here + grid.cell_length(axis, coord - 1)));
        let delta_plus = plus.map_or(0.0, |_| 0.5 * (here + grid.cell_length(axis, coord + 1)));

        Self {
            cell,
            axis,
            minus,
            plus,
            delta_minus,
            delta_plus,
        }
    }

    /// Central difference when both sides are usable, one-sided otherwise.
    pub fn first<F: Fn(usize) -> f64>(&self, f: F) -> Result<f64, PressureError> {
        let centre = f(self.cell);
        match (self.minus, self.plus) {
            (Some(m), Some(p)) => Ok((f(p) - f(m)) / (self.delta_plus + self.delta_minus)),
            (None, Some(p)) => Ok((f(p) - centre) / self.delta_plus),
            (Some(m), None) => Ok((centre - f(m)) / self.delta_minus),
            (None, None) => Err(PressureError::StencilDegenerate {
                cell: self.cell,
                axis: self.axis,
            }),
        }
    }

    /// Three-point second derivative; zero at a one-sided boundary.
    pub fn second<F: Fn(usize) -> f64>(&self, f: F) -> Result<f64, PressureError> {
        match (self.minus, self.plus) {
            (Some(m), Some(p)) => {
                Ok((f(p) - 2.0 * f(self.cell) + f(m)) / (self.delta_plus * self.delta_minus))
            }
            (None, None) => Err(PressureError::StencilDegenerate {
                cell: self.cell,
                axis: self.axis,
            }),
            _ => Ok(0.0),
        }
    }
}

pub fn eval_space_derivs(
    scan: &Scan,
    cell: usize,
    mask: &ThresholdCriteria,
) -> Result<SpaceDerivatives, PressureError> {
    scan.cell(cell)?;
    let mut first = Matrix3::zeros();
    let mut second = Matrix3::zeros();

    for axis in 0..NUM_DIMENSIONS {
        let stencil = AxisStencil::new(scan, cell, axis, mask);
        for comp in 0..NUM_DIMENSIONS {
            let velocity = |idx: usize| scan.cells[idx].velocity[comp];
            first[(axis, comp)] = stencil.first(velocity)?;
            second[(axis, comp)] = stencil.second(velocity)?;
        }
    }

    Ok(SpaceDerivatives { first, second })
}

/// Gradient of an arbitrary scalar quantity at a cell.
pub fn eval_space_gradient(
    scan: &Scan,
    cell: usize,
    quantity: Quantity,
    mask: &ThresholdCriteria,
) -> Result<DVec3, PressureError> {
    scan.cell(cell)?;
    let mut gradient = DVec3::ZERO;
    for axis in 0..NUM_DIMENSIONS {
        let stencil = AxisStencil::new(scan, cell, axis, mask);
        gradient[axis] = stencil.first(|idx| scan.cells[idx].get(quantity))?;
    }
    Ok(gradient)
}
