pub mod momentum;

use serde::{Deserialize, Serialize};

/// Fluid properties used by the momentum balance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Dynamic viscosity [Pa s]
    pub viscosity: f64,
    /// Density [kg/m^3]
    pub density: f64,
}

impl Material {
    pub fn new(viscosity: f64, density: f64) -> Self {
        Self { viscosity, density }
    }

    pub fn water() -> Self {
        Self::new(1.002e-3, 998.2)
    }

    pub fn blood() -> Self {
        Self::new(3.5e-3, 1060.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::water()
    }
}
