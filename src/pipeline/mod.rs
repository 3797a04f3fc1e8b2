//! Pipeline module - preparation, selection and analysis of the dataset

pub mod correlation;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod export;
pub mod filter;
pub mod forest;
pub mod importance;
pub mod loader;
pub mod prepare;
pub mod schema;
pub mod stats;

pub use correlation::*;
pub use dataset::*;
pub use encoding::*;
pub use error::*;
pub use export::*;
pub use filter::*;
pub use forest::{ForestConfig, RandomForest, TrainingSet};
pub use importance::*;
pub use loader::*;
pub use prepare::*;
pub use schema::*;
pub use stats::*;
