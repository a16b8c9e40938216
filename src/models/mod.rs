//! Core data models for race result comparison.

mod comparison;
mod result_row;
mod segment;
mod selection;

pub use comparison::*;
pub use result_row::*;
pub use segment::*;
pub use selection::*;
