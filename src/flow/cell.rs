use super::quantity::Quantity;
use crate::error::PressureError;
use glam::DVec3;

/// Number of independent components of the symmetric Reynolds stress.
pub const REYNOLDS_COMPONENTS: usize = 6;

/// Physical state of one grid cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Doubles as the validity mask for stencils and integration.
    pub concentration: f64,
    pub filtered_velocity: DVec3,
    pub pressure_gradient: DVec3,
    /// `[Rxx, Rxy, Rxz, Ryy, Ryz, Rzz]`
    pub reynolds_stress: [f64; REYNOLDS_COMPONENTS],
    pub relative_pressure: f64,
}

impl Cell {
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::PositionX => self.position.x,
            Quantity::PositionY => self.position.y,
            Quantity::PositionZ => self.position.z,
            Quantity::Concentration => self.concentration,
            Quantity::VelocityX => self.velocity.x,
            Quantity::VelocityY => self.velocity.y,
            Quantity::VelocityZ => self.velocity.z,
            Quantity::FilteredVelocityX => self.filtered_velocity.x,
            Quantity::FilteredVelocityY => self.filtered_velocity.y,
            Quantity::FilteredVelocityZ => self.filtered_velocity.z,
            Quantity::PressureGradientX => self.pressure_gradient.x,
            Quantity::PressureGradientY => self.pressure_gradient.y,
            Quantity::PressureGradientZ => self.pressure_gradient.z,
            Quantity::RelativePressure => self.relative_pressure,
            Quantity::VelocityModulus => self.velocity.length(),
            Quantity::PressureGradientModulus => self.pressure_gradient.length(),
        }
    }

    pub fn set(&mut self, quantity: Quantity, value: f64) -> Result<(), PressureError> {
        let slot = match quantity {
            Quantity::PositionX => &mut self.position.x,
            Quantity::PositionY => &mut self.position.y,
            Quantity::PositionZ => &mut self.position.z,
            Quantity::Concentration => &mut self.concentration,
            Quantity::VelocityX => &mut self.velocity.x,
            Quantity::VelocityY => &mut self.velocity.y,
            Quantity::VelocityZ => &mut self.velocity.z,
            Quantity::FilteredVelocityX => &mut self.filtered_velocity.x,
            Quantity::FilteredVelocityY => &mut self.filtered_velocity.y,
            Quantity::FilteredVelocityZ => &mut self.filtered_velocity.z,
            Quantity::PressureGradientX => &mut self.pressure_gradient.x,
            Quantity::PressureGradientY => &mut self.pressure_gradient.y,
            Quantity::PressureGradientZ => &mut self.pressure_gradient.z,
            Quantity::RelativePressure => &mut self.relative_pressure,
            Quantity::VelocityModulus | Quantity::PressureGradientModulus => {
                return Err(PressureError::InvalidQuantity(format!(
                    "{quantity} is derived and cannot be assigned"
                )));
            }
        };
        *slot = value;
        Ok(())
    }
}
