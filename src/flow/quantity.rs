use crate::error::PressureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a scalar stored on (or derived from) a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    PositionX,
    PositionY,
    PositionZ,
    Concentration,
    VelocityX,
    VelocityY,
    VelocityZ,
    FilteredVelocityX,
    FilteredVelocityY,
    FilteredVelocityZ,
    PressureGradientX,
    PressureGradientY,
    PressureGradientZ,
    RelativePressure,
    VelocityModulus,
    PressureGradientModulus,
}

impl Quantity {
    pub const ALL: [Quantity; 16] = [
        Quantity::PositionX,
        Quantity::PositionY,
        Quantity::PositionZ,
        Quantity::Concentration,
        Quantity::VelocityX,
        Quantity::VelocityY,
        Quantity::VelocityZ,
        Quantity::FilteredVelocityX,
        Quantity::FilteredVelocityY,
        Quantity::FilteredVelocityZ,
        Quantity::PressureGradientX,
        Quantity::PressureGradientY,
        Quantity::PressureGradientZ,
        Quantity::RelativePressure,
        Quantity::VelocityModulus,
        Quantity::PressureGradientModulus,
    ];

    pub const VELOCITY: [Quantity; 3] = [
        Quantity::VelocityX,
        Quantity::VelocityY,
        Quantity::VelocityZ,
    ];

    pub const PRESSURE_GRADIENT: [Quantity; 3] = [
        Quantity::PressureGradientX,
        Quantity::PressureGradientY,
        Quantity::PressureGradientZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Quantity::PositionX => "position_x",
            Quantity::PositionY => "position_y",
            Quantity::PositionZ => "position_z",
            Quantity::Concentration => "concentration",
            Quantity::VelocityX => "velocity_x",
            Quantity::VelocityY => "velocity_y",
            Quantity::VelocityZ => "velocity_z",
            Quantity::FilteredVelocityX => "filtered_velocity_x",
            Quantity::FilteredVelocityY => "filtered_velocity_y",
            Quantity::FilteredVelocityZ => "filtered_velocity_z",
            Quantity::PressureGradientX => "pressure_gradient_x",
            Quantity::PressureGradientY => "pressure_gradient_y",
            Quantity::PressureGradientZ => "pressure_gradient_z",
            Quantity::RelativePressure => "relative_pressure",
            Quantity::VelocityModulus => "velocity_modulus",
            Quantity::PressureGradientModulus => "pressure_gradient_modulus",
        }
    }

    /// Moduli are computed on read and cannot be assigned.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Quantity::VelocityModulus | Quantity::PressureGradientModulus
        )
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quantity {
    type Err = PressureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| PressureError::InvalidQuantity(s.to_string()))
    }
}
