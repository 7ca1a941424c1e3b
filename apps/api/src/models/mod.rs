pub mod analysis;
pub mod catalog;
pub mod student;
