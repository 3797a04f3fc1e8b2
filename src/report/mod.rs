//! Report module - terminal tables, run summary and JSON export

pub mod analysis_export;
pub mod summary;
pub mod tables;

pub use analysis_export::*;
pub use summary::*;
pub use tables::*;
