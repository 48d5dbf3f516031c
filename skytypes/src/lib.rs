pub mod angle;
pub mod coordinate;
pub mod dataset;
pub mod prelude;
pub mod record;
