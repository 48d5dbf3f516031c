pub use crate::angle::{Declination, RightAscension, Sign};
pub use crate::coordinate::{Bounds, DecimalCoordinate};
pub use crate::dataset::{MainStarSet, PlotDataset};
pub use crate::record::{RawStarRecord, PLACEHOLDER};
