pub extern crate nalgebra as na;

pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod render;

pub use skytypes::prelude::*;
