pub mod config;
pub mod discretization;
pub mod error;
pub mod flow;
pub mod numerics;
pub mod physics;
pub mod pressure;
pub mod processing;

pub use config::{ConfigError, FilterSettings, PressureConfig};
pub use error::PressureError;
pub use pressure::{ReconstructionReport, reconstruct};
