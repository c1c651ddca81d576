use super::grid::GridTopology;
use crate::error::PressureError;

/// Build a grid with equal spacing on each axis over `[min, max]`.
pub fn create_uniform_grid(
    cell_totals: [usize; 3],
    domain_min: [f64; 3],
    domain_max: [f64; 3],
) -> Result<GridTopology, PressureError> {
    let lengths = std::array::from_fn(|axis| {
        let n = cell_totals[axis];
        let h = (domain_max[axis] - domain_min[axis]) / n.max(1) as f64;
        vec![h; n]
    });
    GridTopology::new(lengths, domain_min)
}

/// Build a grid whose spacing grows geometrically by `ratio[axis]` from the
/// first cell. A ratio of 1.0 gives uniform spacing.
pub fn create_stretched_grid(
    cell_totals: [usize; 3],
    first_length: [f64; 3],
    ratio: [f64; 3],
    origin: [f64; 3],
) -> Result<GridTopology, PressureError> {
    let lengths = std::array::from_fn(|axis| {
        (0..cell_totals[axis])
            .map(|i| first_length[axis] * ratio[axis].powi(i as i32))
            .collect()
    });
    GridTopology::new(lengths, origin)
}

/// Build a grid from explicit face coordinates along each axis.
pub fn create_grid_from_faces(faces: [&[f64]; 3]) -> Result<GridTopology, PressureError> {
    let mut origin = [0.0; 3];
    let mut lengths: [Vec<f64>; 3] = Default::default();
    for axis in 0..3 {
        let f = faces[axis];
        if f.len() < 2 {
            return Err(PressureError::InvalidGrid(format!(
                "axis {axis} needs at least two faces"
            )));
        }
        origin[axis] = f[0];
        lengths[axis] = f.windows(2).map(|w| w[1] - w[0]).collect();
    }
    GridTopology::new(lengths, origin)
}
