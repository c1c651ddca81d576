use crate::flow::{Quantity, ThresholdCriteria};
use crate::physics::Material;
use crate::physics::momentum::MomentumBalance;
use crate::processing::filter::FilterMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Neighbour filter applied to a group of quantities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub quantities: Vec<Quantity>,
    pub iterations: usize,
    pub mode: FilterMode,
}

impl FilterSettings {
    pub fn velocity(iterations: usize, mode: FilterMode) -> Self {
        Self {
            quantities: Quantity::VELOCITY.to_vec(),
            iterations,
            mode,
        }
    }

    pub fn pressure_gradient(iterations: usize, mode: FilterMode) -> Self {
        Self {
            quantities: Quantity::PRESSURE_GRADIENT.to_vec(),
            iterations,
            mode,
        }
    }
}

/// Settings for one reconstruction run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureConfig {
    pub material: Material,
    pub momentum: MomentumBalance,
    /// Neighbours meeting this are left out of finite-difference stencils.
    pub stencil_mask: ThresholdCriteria,
    /// Cells must meet this to take part in the flood fill. `None` accepts
    /// every inner, moving cell.
    pub eligibility: Option<ThresholdCriteria>,
    /// Flood fill seed; the first eligible cell when unset.
    pub seed: Option<usize>,
    pub reference_pressure: f64,
    pub smoothing: bool,
    /// Applied to the input velocities before differentiation.
    pub velocity_filter: Option<FilterSettings>,
    /// Applied to the assembled gradient before integration.
    pub gradient_filter: Option<FilterSettings>,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            material: Material::default(),
            momentum: MomentumBalance::default(),
            stencil_mask: ThresholdCriteria::stencil_default(),
            eligibility: None,
            seed: None,
            reference_pressure: 0.0,
            smoothing: false,
            velocity_filter: None,
            gradient_filter: None,
        }
    }
}

impl PressureConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Criterion;
    use crate::physics::momentum::{PressureFormula, ReynoldsStressPolicy};

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg = PressureConfig::from_json_str(
            r#"{
                "material": { "viscosity": 0.0035, "density": 1060.0 },
                "eligibility": { "quantity": "concentration", "criterion": "less_than", "threshold": 0.2 },
                "smoothing": true
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.material, Material::blood());
        assert_eq!(
            cfg.eligibility,
            Some(ThresholdCriteria::new(Quantity::Concentration, Criterion::LessThan, 0.2))
        );
        assert!(cfg.smoothing);
        assert_eq!(cfg.stencil_mask, ThresholdCriteria::stencil_default());
        assert_eq!(cfg.momentum.formula, PressureFormula::Full);
        assert_eq!(cfg.momentum.reynolds_stress, ReynoldsStressPolicy::Excluded);
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = PressureConfig {
            seed: Some(42),
            gradient_filter: Some(FilterSettings::pressure_gradient(3, FilterMode::Median)),
            ..PressureConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(PressureConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn unknown_quantity_is_rejected() {
        let err = PressureConfig::from_json_str(
            r#"{ "stencil_mask": { "quantity": "pressure", "criterion": "less_than", "threshold": 0.5 } }"#,
        );
        assert!(matches!(err, Err(ConfigError::Json(_))));
    }
}
