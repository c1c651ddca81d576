pub mod generator;
pub mod grid;
