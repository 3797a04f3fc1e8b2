//! Pairwise Pearson correlation over the fields of a view

use faer::Mat;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use super::dataset::View;
use super::error::{PipelineError, PipelineResult};
use super::stats::is_constant;

/// Represents a correlated pair of features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

/// Symmetric correlation matrix with a unit diagonal.
///
/// Entries involving a zero-variance field are NaN (serialized as null).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    fields: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build from the strict upper triangle, mirroring it below the diagonal
    fn from_upper(fields: Vec<String>, upper: &[((usize, usize), f64)]) -> Self {
        let n = fields.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        for &((i, j), r) in upper {
            let r = r.clamp(-1.0, 1.0);
            values[i][j] = r;
            values[j][i] = r;
        }
        Self { fields, values }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Coefficient by position
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Coefficient by field names, `None` if either field is absent
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.fields.iter().position(|f| f == a)?;
        let j = self.fields.iter().position(|f| f == b)?;
        Some(self.values[i][j])
    }

    /// Off-diagonal pairs with |r| above `threshold`, strongest first
    pub fn strongest_pairs(&self, threshold: f64) -> Vec<CorrelatedPair> {
        let n = self.len();
        let mut pairs = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                let corr = self.values[i][j];
                if corr.abs() > threshold && !corr.is_nan() {
                    pairs.push(CorrelatedPair {
                        feature1: self.fields[i].clone(),
                        feature2: self.fields[j].clone(),
                        correlation: corr,
                    });
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        pairs
    }
}

/// Threshold for auto-selecting matrix vs pairwise correlation computation.
/// Matrix multiplication is more efficient when there are many columns.
const MATRIX_METHOD_COLUMN_THRESHOLD: usize = 15;

/// Every field of the view, codes included, as f64 columns
fn view_columns(view: &View<'_>) -> PipelineResult<Vec<(String, Vec<f64>)>> {
    if view.len() < 2 {
        return Err(PipelineError::insufficient(format!(
            "correlation needs at least 2 rows, view has {}",
            view.len()
        )));
    }

    view.schema()
        .names()
        .into_iter()
        .map(|name| -> PipelineResult<(String, Vec<f64>)> {
            Ok((name.to_string(), view.values(name)?))
        })
        .collect()
}

/// Correlation matrix using the method suited to the column count
pub fn correlate(view: &View<'_>) -> PipelineResult<CorrelationMatrix> {
    if view.schema().len() >= MATRIX_METHOD_COLUMN_THRESHOLD {
        correlate_matrix(view)
    } else {
        correlate_pairwise(view)
    }
}

/// Correlation matrix computed pair by pair with Welford's algorithm
pub fn correlate_pairwise(view: &View<'_>) -> PipelineResult<CorrelationMatrix> {
    let columns = view_columns(view)?;
    let n_cols = columns.len();

    let pairs: Vec<(usize, usize)> = (0..n_cols)
        .flat_map(|i| ((i + 1)..n_cols).map(move |j| (i, j)))
        .collect();

    let upper: Vec<((usize, usize), f64)> = pairs
        .par_iter()
        .map(|&(i, j)| ((i, j), pearson(&columns[i].1, &columns[j].1)))
        .collect();

    debug!("Computed {} correlation pair(s) pairwise", upper.len());

    let fields = columns.into_iter().map(|(name, _)| name).collect();
    Ok(CorrelationMatrix::from_upper(fields, &upper))
}

/// Single-pass Pearson correlation; NaN when either side has zero variance
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 || is_constant(xs) || is_constant(ys) {
        return f64::NAN;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in xs.iter().zip(ys) {
        n += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return f64::NAN;
    }

    cov_xy / (var_x.sqrt() * var_y.sqrt())
}

/// Compute the correlation matrix with one matrix product.
///
/// Algorithm:
/// 1. Standardize each non-constant column: z = (x - mean) / (std * sqrt(n))
/// 2. Stack the standardized columns into Z (n_rows x n_valid)
/// 3. R = Z^T * Z
pub fn correlate_matrix(view: &View<'_>) -> PipelineResult<CorrelationMatrix> {
    let columns = view_columns(view)?;
    let n_rows = view.len();
    let scale = (n_rows as f64).sqrt();

    let standardized: Vec<Option<Vec<f64>>> = columns
        .par_iter()
        .map(|(_, values)| {
            if is_constant(values) {
                return None;
            }
            let mean = values.iter().sum::<f64>() / n_rows as f64;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n_rows as f64;
            let std = var.sqrt();
            if std <= 0.0 || std.is_nan() {
                return None;
            }
            Some(values.iter().map(|v| (v - mean) / (std * scale)).collect())
        })
        .collect();

    // Positions of usable columns in the full field list
    let valid: Vec<usize> = standardized
        .iter()
        .enumerate()
        .filter_map(|(i, col)| col.as_ref().map(|_| i))
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, valid.len());
    for (col_idx, &field_idx) in valid.iter().enumerate() {
        if let Some(col_data) = &standardized[field_idx] {
            for (row_idx, &val) in col_data.iter().enumerate() {
                z[(row_idx, col_idx)] = val;
            }
        }
    }

    let product = z.transpose() * &z;

    let mut upper = Vec::new();
    for a in 0..valid.len() {
        for b in (a + 1)..valid.len() {
            upper.push(((valid[a], valid[b]), product[(a, b)]));
        }
    }

    debug!(
        "Computed correlation matrix over {} column(s), {} non-constant",
        columns.len(),
        valid.len()
    );

    let fields = columns.into_iter().map(|(name, _)| name).collect();
    Ok(CorrelationMatrix::from_upper(fields, &upper))
}
