use crate::error::PressureError;
use crate::flow::Sequence;
use glam::DVec3;

/// Which end of a three-sample window the derivative is taken at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    First,
    Last,
}

/// Slope of the parabola through `(−h1, y1)`, `(0, y2)`, `(h2, y3)` at the
/// requested end point. Linear in the samples, so vectors are handled
/// component-wise for free.
pub fn parabolic_derivative(
    y1: DVec3,
    y2: DVec3,
    y3: DVec3,
    h1: f64,
    h2: f64,
    endpoint: Endpoint,
) -> DVec3 {
    let ratio = h2 / h1;
    let b = ((y3 - y2) - (y1 - y2) * ratio * ratio) / (h2 * h2 / h1 + h2);
    let a = (y1 - y2 + b * h1) / (h1 * h1);
    match endpoint {
        Endpoint::First => b - 2.0 * a * h1,
        Endpoint::Last => b + 2.0 * a * h2,
    }
}

/// Average of the backward and forward differences around `curr`.
fn central(prev: DVec3, curr: DVec3, next: DVec3, dt_back: f64, dt_fwd: f64) -> DVec3 {
    (curr - prev) / (2.0 * dt_back) + (next - curr) / (2.0 * dt_fwd)
}

/// Velocity time derivative at `(scan, cell)`.
pub fn eval_time_derivs(
    sequence: &Sequence,
    scan: usize,
    cell: usize,
) -> Result<DVec3, PressureError> {
    let total = sequence.len();
    let current = sequence.scan(scan)?;
    current.cell(cell)?;
    if total < 2 {
        return Ok(DVec3::ZERO);
    }

    let scans = sequence.scans();
    let vel = |s: usize| scans[s].cells[cell].velocity;
    let time = |s: usize| scans[s].scan_time;
    let last = total - 1;

    let deriv = if scan == 0 {
        let dt = time(1) - time(0);
        if sequence.is_cyclic() {
            central(vel(last), vel(0), vel(1), dt, dt)
        } else if total > 2 {
            let dt2 = time(2) - time(1);
            parabolic_derivative(vel(0), vel(1), vel(2), dt, dt2, Endpoint::First)
        } else {
            (vel(1) - vel(0)) / dt
        }
    } else if scan == last {
        let dt = time(last) - time(last - 1);
        if sequence.is_cyclic() {
            central(vel(last - 1), vel(last), vel(0), dt, dt)
        } else if total > 2 {
            let dt1 = time(last - 1) - time(last - 2);
            parabolic_derivative(
                vel(last - 2),
                vel(last - 1),
                vel(last),
                dt1,
                dt,
                Endpoint::Last,
            )
        } else {
            (vel(last) - vel(last - 1)) / dt
        }
    } else {
        central(
            vel(scan - 1),
            vel(scan),
            vel(scan + 1),
            time(scan) - time(scan - 1),
            time(scan + 1) - time(scan),
        )
    };

    Ok(deriv)
}
