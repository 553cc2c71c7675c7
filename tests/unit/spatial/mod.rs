pub mod assignment;
pub mod grid;
