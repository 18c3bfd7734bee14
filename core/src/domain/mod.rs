pub mod common;
pub mod medicine_analysis;
