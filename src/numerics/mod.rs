pub mod reynolds;
pub mod space;
pub mod time;
pub mod timing;

/// Velocity moduli and pressures at or below this are treated as zero.
pub const MATH_ZERO: f64 = 1.0e-12;

/// Values at or below this magnitude are skipped by the filter change metric.
pub const FILTER_ZERO: f64 = 1.0e-7;
