pub mod aggregate;
pub mod limits;
pub mod path;
pub mod traverse;
