pub mod cell;
pub mod criteria;
pub mod quantity;
pub mod scan;
pub mod sequence;

pub use cell::Cell;
pub use criteria::{Criterion, ThresholdCriteria};
pub use quantity::Quantity;
pub use scan::Scan;
pub use sequence::Sequence;
