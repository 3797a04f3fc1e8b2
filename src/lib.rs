//! GradeLens: Student Performance Analysis Library
//!
//! Prepares student records for analysis (label encoding, imputation,
//! optional scaling), selects rows with composable filters, ranks the
//! drivers of a categorical outcome with a seeded random forest and
//! computes pairwise Pearson correlations.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
