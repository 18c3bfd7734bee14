pub mod assets;
pub mod medicine_analysis;
pub mod server;
