use super::cell::Cell;
use super::quantity::Quantity;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    LessThan,
    GreaterThan,
    AbsLessThan,
    AbsGreaterThan,
}

/// A cell predicate `criterion(cell[quantity], threshold)`.
///
/// The direction of the comparison is part of the configuration: concentration
/// masks mean "fluid" above a threshold for some acquisitions and below it for
/// others.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCriteria {
    pub quantity: Quantity,
    pub criterion: Criterion,
    pub threshold: f64,
}

impl ThresholdCriteria {
    pub fn new(quantity: Quantity, criterion: Criterion, threshold: f64) -> Self {
        Self {
            quantity,
            criterion,
            threshold,
        }
    }

    /// Default stencil mask: neighbours with concentration below 0.5 are
    /// excluded from finite differences.
    pub fn stencil_default() -> Self {
        Self::new(Quantity::Concentration, Criterion::LessThan, 0.5)
    }

    pub fn meets_value(&self, value: f64) -> bool {
        match self.criterion {
            Criterion::LessThan => value < self.threshold,
            Criterion::GreaterThan => value > self.threshold,
            Criterion::AbsLessThan => value.abs() < self.threshold,
            Criterion::AbsGreaterThan => value.abs() > self.threshold,
        }
    }

    pub fn meets(&self, cell: &Cell) -> bool {
        self.meets_value(cell.get(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_follow_criterion() {
        let lt = ThresholdCriteria::new(Quantity::Concentration, Criterion::LessThan, 0.2);
        let gt = ThresholdCriteria { criterion: Criterion::GreaterThan, ..lt };
        let abs_lt = ThresholdCriteria::new(Quantity::VelocityX, Criterion::AbsLessThan, 1.0);

        assert!(lt.meets_value(0.1) && !lt.meets_value(0.2));
        assert!(gt.meets_value(0.3) && !gt.meets_value(0.2));
        assert!(abs_lt.meets_value(-0.5) && !abs_lt.meets_value(-1.5));
        assert!(ThresholdCriteria::new(Quantity::VelocityX, Criterion::AbsGreaterThan, 1.0)
            .meets_value(-1.5));
    }

    #[test]
    fn reads_the_configured_quantity() {
        let mut cell = Cell::default();
        cell.concentration = 0.7;
        assert!(!ThresholdCriteria::stencil_default().meets(&cell));
        cell.concentration = 0.3;
        assert!(ThresholdCriteria::stencil_default().meets(&cell));
    }
}
