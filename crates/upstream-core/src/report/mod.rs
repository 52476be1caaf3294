pub mod grid;
pub mod sheet;
