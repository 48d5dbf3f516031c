pub use crate::parser::{
    parse_coordinate, parse_declination, parse_right_ascension, CoordinateError,
};
pub use skytypes::prelude::*;

pub mod parser;

pub const HOURS_UNIT: char = 'h';
pub const MINUTES_UNIT: char = 'm';
pub const SECONDS_UNIT: char = 's';
pub const DEGREE_SIGN: char = '°';
pub const PRIME: char = '′';
pub const DOUBLE_PRIME: char = '″';
pub const MINUS_SIGN: char = '−';
