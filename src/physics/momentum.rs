use super::Material;
use crate::numerics::space::SpaceDerivatives;
use glam::DVec3;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Which terms of the incompressible momentum balance make up the gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureFormula {
    ViscousOnly,
    ConvectiveOnly,
    StressOnly,
    #[default]
    Full,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReynoldsStressPolicy {
    Included,
    #[default]
    Excluded,
}

/// Per-cell inputs to the balance.
pub struct CellKinematics<'a> {
    pub velocity: DVec3,
    pub time_deriv: DVec3,
    pub space: &'a SpaceDerivatives,
    /// `None` when the scan carries no Reynolds stress data.
    pub reynolds_stress_grad: Option<&'a Matrix3<f64>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumBalance {
    pub formula: PressureFormula,
    pub reynolds_stress: ReynoldsStressPolicy,
    /// Body force per unit volume added by the full formula.
    pub gravity: [f64; 3],
}

impl MomentumBalance {
    /// grad p = mu * lap(u) + g - rho * (du/dt + (u . grad) u) [- rho * div(R)]
    pub fn pressure_gradient(&self, material: &Material, k: &CellKinematics) -> DVec3 {
        let mut gradient = DVec3::ZERO;
        for comp in 0..3 {
            let viscous = material.viscosity * k.space.second.column(comp).sum();
            let advection: f64 = (0..3)
                .map(|axis| k.velocity[axis] * k.space.first[(axis, comp)])
                .sum();
            let convective = material.density * (k.time_deriv[comp] + advection);
            let stress = k
                .reynolds_stress_grad
                .map_or(0.0, |g| material.density * g.column(comp).sum());

            gradient[comp] = match self.formula {
                PressureFormula::ViscousOnly => viscous,
                PressureFormula::ConvectiveOnly => -convective,
                PressureFormula::StressOnly => -stress,
                PressureFormula::Full => {
                    let base = viscous + self.gravity[comp] - convective;
                    match self.reynolds_stress {
                        ReynoldsStressPolicy::Included => base - stress,
                        ReynoldsStressPolicy::Excluded => base,
                    }
                }
            };
        }
        gradient
    }
}
