use crate::error::PressureError;
use glam::DVec3;

pub const NUM_DIMENSIONS: usize = 3;
pub const NUM_NEIGHBORS: usize = 6;

/// Face neighbours of a cell, ordered `[-x, +x, -y, +y, -z, +z]`.
/// `None` marks a neighbour outside the domain.
pub type Neighbors = [Option<usize>; NUM_NEIGHBORS];

/// Structured 3D grid with per-axis non-uniform spacing.
///
/// Cells are numbered x-fastest: `index = i + j * nx + k * nx * ny`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTopology {
    cell_totals: [usize; 3],
    domain_min: [f64; 3],
    domain_max: [f64; 3],
    /// Cell lengths along each axis, `cell_lengths[axis][i]`.
    cell_lengths: [Vec<f64>; 3],
    /// Cell centre coordinates along each axis.
    centers: [Vec<f64>; 3],
}

impl GridTopology {
    pub fn new(cell_lengths: [Vec<f64>; 3], origin: [f64; 3]) -> Result<Self, PressureError> {
        let mut cell_totals = [0usize; 3];
        let mut domain_max = origin;
        let mut centers: [Vec<f64>; 3] = Default::default();

        for axis in 0..NUM_DIMENSIONS {
            let lengths = &cell_lengths[axis];
            if lengths.is_empty() {
                return Err(PressureError::InvalidGrid(format!("axis {axis} has no cells")));
            }
            if let Some(bad) = lengths.iter().find(|l| !l.is_finite() || **l <= 0.0) {
                return Err(PressureError::InvalidGrid(format!(
                    "axis {axis} has non-positive cell length {bad}"
                )));
            }

            cell_totals[axis] = lengths.len();
            let mut face = origin[axis];
            centers[axis] = lengths
                .iter()
                .map(|l| {
                    let c = face + 0.5 * l;
                    face += l;
                    c
                })
                .collect();
            domain_max[axis] = face;
        }

        Ok(Self {
            cell_totals,
            domain_min: origin,
            domain_max,
            cell_lengths,
            centers,
        })
    }

    pub fn cell_totals(&self) -> [usize; 3] {
        self.cell_totals
    }

    pub fn domain_min(&self) -> [f64; 3] {
        self.domain_min
    }

    pub fn domain_max(&self) -> [f64; 3] {
        self.domain_max
    }

    pub fn cell_lengths(&self, axis: usize) -> &[f64] {
        &self.cell_lengths[axis]
    }

    pub fn total_cells(&self) -> usize {
        self.cell_totals.iter().product()
    }

    pub fn coords_to_index(&self, i: usize, j: usize, k: usize) -> usize {
        let [nx, ny, _] = self.cell_totals;
        i + j * nx + k * nx * ny
    }

    pub fn index_to_coords(&self, index: usize) -> [usize; 3] {
        let [nx, ny, _] = self.cell_totals;
        [index % nx, (index / nx) % ny, index / (nx * ny)]
    }

    pub fn cell_center(&self, index: usize) -> DVec3 {
        let [i, j, k] = self.index_to_coords(index);
        DVec3::new(self.centers[0][i], self.centers[1][j], self.centers[2][k])
    }

    /// Length of cell `coord` along `axis`.
    pub fn cell_length(&self, axis: usize, coord: usize) -> f64 {
        self.cell_lengths[axis][coord]
    }

    /// Same-axis neighbours `(minus, plus)` of a cell.
    pub fn axis_neighbors(&self, index: usize, axis: usize) -> (Option<usize>, Option<usize>) {
        let coords = self.index_to_coords(index);
        let step = self.axis_stride(axis);
        let minus = (coords[axis] > 0).then(|| index - step);
        let plus = (coords[axis] + 1 < self.cell_totals[axis]).then(|| index + step);
        (minus, plus)
    }

    pub fn neighbors(&self, index: usize) -> Neighbors {
        let mut out = [None; NUM_NEIGHBORS];
        for axis in 0..NUM_DIMENSIONS {
            let (minus, plus) = self.axis_neighbors(index, axis);
            out[2 * axis] = minus;
            out[2 * axis + 1] = plus;
        }
        out
    }

    /// A cell is inner when it touches no face of the domain.
    pub fn is_inner_cell(&self, index: usize) -> bool {
        let coords = self.index_to_coords(index);
        (0..NUM_DIMENSIONS).all(|axis| coords[axis] > 0 && coords[axis] + 1 < self.cell_totals[axis])
    }

    /// Index of the cell containing `point`, if it lies inside the domain.
    pub fn locate(&self, point: DVec3) -> Option<usize> {
        if !point.is_finite() {
            return None;
        }
        let p = point.to_array();
        let mut coords = [0usize; 3];
        for axis in 0..NUM_DIMENSIONS {
            if p[axis] < self.domain_min[axis] || p[axis] > self.domain_max[axis] {
                return None;
            }
            let mut face = self.domain_min[axis];
            let last = self.cell_totals[axis] - 1;
            coords[axis] = self.cell_lengths[axis]
                .iter()
                .position(|l| {
                    face += l;
                    p[axis] < face
                })
                .unwrap_or(last);
        }
        Some(self.coords_to_index(coords[0], coords[1], coords[2]))
    }

    fn axis_stride(&self, axis: usize) -> usize {
        self.cell_totals[..axis].iter().product()
    }
}
