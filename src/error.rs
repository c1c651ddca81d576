use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PressureError {
    #[error("both neighbours invalid along axis {axis} at cell {cell}")]
    StencilDegenerate { cell: usize, axis: usize },
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("scan topology does not match the sequence topology")]
    TopologyMismatch,
    #[error("scan holds {cells} cells but its grid has {expected}")]
    CellCountMismatch { cells: usize, expected: usize },
    #[error("scan time {time} does not follow previous scan time {previous}")]
    InvalidScanTime { time: f64, previous: f64 },
    #[error("scan index {index} out of range ({total} scans)")]
    ScanOutOfRange { index: usize, total: usize },
    #[error("cell index {index} out of range ({total} cells)")]
    CellOutOfRange { index: usize, total: usize },
    #[error("seed cell {0} is not eligible for integration")]
    IneligibleSeed(usize),
}
