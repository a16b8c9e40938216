pub mod athletes;
pub mod compare;
pub mod options;
pub mod races;
