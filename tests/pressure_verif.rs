use glam::DVec3;
use std::sync::Arc;

use relpress_rs::discretization::generator::create_stretched_grid;
use relpress_rs::flow::{Criterion, Quantity, Scan, Sequence, ThresholdCriteria};
use relpress_rs::pressure::flood_fill::eval_relative_pressure;
use relpress_rs::pressure::smoother::{SMOOTHING_SWEEPS, perform_pressure_iterations};
use relpress_rs::processing::filter::{FilterMode, apply_neighbor_filter};
use relpress_rs::{FilterSettings, PressureConfig, reconstruct};

// f = x^2 - 3 y z + 2 z, integrated exactly by the trapezoidal path rule
fn potential(p: DVec3) -> f64 {
    p.x * p.x - 3.0 * p.y * p.z + 2.0 * p.z
}

fn potential_gradient(p: DVec3) -> DVec3 {
    DVec3::new(2.0 * p.x, -3.0 * p.z, -3.0 * p.y + 2.0)
}

fn moving_scan() -> Scan {
    let grid = Arc::new(
        create_stretched_grid([9, 6, 5], [0.1, 0.2, 0.15], [1.1, 0.9, 1.2], [-0.4, 0.0, -0.3])
            .unwrap(),
    );
    Scan::new(grid, 0.0).with_flow(|_| (DVec3::new(0.2, 0.1, 0.0), 1.0))
}

#[test]
fn conservative_field_round_trip_per_region() {
    let mut scan = moving_scan();
    // a plane of wall cells at i = 4 splits the inner block in two
    for idx in 0..scan.total_cells() {
        let p = scan.cells()[idx].position;
        scan.cells_mut()[idx].pressure_gradient = potential_gradient(p);
        if scan.grid().index_to_coords(idx)[0] == 4 {
            scan.cells_mut()[idx].concentration = 0.0;
        }
    }
    let fluid = ThresholdCriteria::new(Quantity::Concentration, Criterion::GreaterThan, 0.5);
    let seed = scan.grid().coords_to_index(6, 3, 2);

    let report = eval_relative_pressure(&mut scan, Some(seed), 5.0, Some(&fluid)).unwrap();
    assert_eq!(report.components, 2);
    assert_eq!(report.visited_cells, report.eligible_cells);
    assert_eq!(report.eligible_cells, 6 * 4 * 3);

    let cells = scan.cells();
    let offset = |idx: usize| cells[idx].relative_pressure - potential(cells[idx].position);
    let seeded_offset = 5.0 - potential(cells[seed].position);
    let reseeded = scan.grid().coords_to_index(1, 1, 1);
    let reseeded_offset = -potential(cells[reseeded].position);

    let mut max_err: f64 = 0.0;
    for idx in (0..scan.total_cells()).filter(|&i| scan.is_inner_cell(i)) {
        let i = scan.grid().index_to_coords(idx)[0];
        let expected = match i {
            1..=3 => reseeded_offset,
            5..=7 => seeded_offset,
            _ => continue,
        };
        max_err = max_err.max((offset(idx) - expected).abs());
    }
    println!("Round-trip max error: {:.2e}", max_err);
    assert!(max_err < 1e-12);
}

#[test]
fn smoother_runs_fixed_sweeps_without_diverging() {
    let mut scan = moving_scan();
    for cell in scan.cells_mut() {
        let p = cell.position;
        cell.relative_pressure = (7.0 * p.x).sin() + (5.0 * p.y * p.z).cos();
        cell.pressure_gradient = DVec3::new(0.3, -0.2, 0.1);
    }
    let initial = scan.quantity_values(Quantity::RelativePressure);
    let bound = initial.iter().fold(0.0_f64, |m, v| m.max(v.abs()));

    let report = perform_pressure_iterations(&mut scan);
    assert_eq!(report.sweeps, SMOOTHING_SWEEPS);
    assert_eq!(report.max_relative_change.len(), SMOOTHING_SWEEPS);

    let (lo, hi) = (scan.grid().domain_min(), scan.grid().domain_max());
    let extent: f64 = (0..3).map(|axis| hi[axis] - lo[axis]).sum();
    for (idx, cell) in scan.cells().iter().enumerate() {
        assert!(cell.relative_pressure.is_finite());
        assert!(cell.relative_pressure.abs() <= 2.0 * (bound + extent));
        if !scan.is_inner_cell(idx) {
            assert_eq!(cell.relative_pressure, initial[idx]);
        }
    }
}

#[test]
fn median_filter_is_idempotent_on_constant_field() {
    let mut scan = moving_scan();
    let before = scan.cells().to_vec();
    for q in Quantity::VELOCITY {
        let report = apply_neighbor_filter(&mut scan, q, 5, FilterMode::Median).unwrap();
        assert!(report.max_change_percent.iter().all(|&c| c == 0.0));
    }
    assert_eq!(scan.cells(), before.as_slice());
}

#[test]
fn boundary_cells_survive_full_reconstruction() {
    let grid = Arc::new(create_stretched_grid([7, 6, 5], [0.1; 3], [1.05, 1.0, 0.95], [0.0; 3]).unwrap());
    let marker_gradient = DVec3::new(-1.0, 2.0, -3.0);
    let marker_pressure = 42.0;

    let mut sequence = Sequence::new(true);
    for s in 0..4 {
        let t = 0.1 * s as f64;
        let mut scan = Scan::new(grid.clone(), t)
            .with_flow(|p| (DVec3::new(1.0 + p.y * (1.0 + t), 0.5 * p.z, -0.2), 1.0));
        for idx in 0..scan.total_cells() {
            if !scan.is_inner_cell(idx) {
                scan.cells_mut()[idx].pressure_gradient = marker_gradient;
                scan.cells_mut()[idx].relative_pressure = marker_pressure;
            }
        }
        sequence.add_scan(scan).unwrap();
    }

    let config = PressureConfig {
        smoothing: true,
        velocity_filter: Some(FilterSettings::velocity(2, FilterMode::Mean)),
        gradient_filter: Some(FilterSettings::pressure_gradient(2, FilterMode::Median)),
        ..PressureConfig::default()
    };
    let reports = reconstruct(&mut sequence, &config).unwrap();
    assert_eq!(reports.len(), 4);

    for (scan, report) in sequence.scans().iter().zip(&reports) {
        assert_eq!(report.pressure.flood_fill.components, 1);
        for idx in (0..scan.total_cells()).filter(|&i| !scan.is_inner_cell(i)) {
            assert_eq!(scan.cells()[idx].pressure_gradient, marker_gradient);
            assert_eq!(scan.cells()[idx].relative_pressure, marker_pressure);
        }
    }
}
