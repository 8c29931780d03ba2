pub mod editors;
pub mod engines;
pub mod surfaces;
