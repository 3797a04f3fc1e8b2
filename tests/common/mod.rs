//! Shared test utilities and fixture generators

#![allow(dead_code)]

use gradelens::pipeline::*;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

pub const STUDENT_ROWS: usize = 100;

fn grade_for(score: f64) -> &'static str {
    if score >= 85.0 {
        "A"
    } else if score >= 70.0 {
        "B"
    } else if score >= 55.0 {
        "C"
    } else {
        "D"
    }
}

/// Create a deterministic students grading DataFrame.
///
/// - `Grade` is a function of `Final_Score` alone (A >= 85, B >= 70, C >= 55, else D)
/// - `Department` cycles CS, Math, Bio
/// - `Midterm_Score` tracks `Final_Score` closely
/// - `Parent_Education_Level` is missing on every tenth row
/// - identifier columns (`Student_ID`, names, `Email`) are free text
pub fn create_student_dataframe() -> DataFrame {
    let n = STUDENT_ROWS;
    let final_score: Vec<f64> = (0..n).map(|i| 40.0 + ((i * 37) % 60) as f64).collect();
    let midterm_score: Vec<f64> = final_score
        .iter()
        .enumerate()
        .map(|(i, s)| s - 5.0 + (i % 3) as f64)
        .collect();
    let grade: Vec<&str> = final_score.iter().map(|&s| grade_for(s)).collect();

    let columns = vec![
        Column::new(
            "Student_ID".into(),
            (0..n).map(|i| format!("S{:04}", i)).collect::<Vec<_>>(),
        ),
        Column::new(
            "First_Name".into(),
            (0..n)
                .map(|i| ["Ana", "Ben", "Chen", "Dara", "Eli"][i % 5].to_string())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Last_Name".into(),
            (0..n)
                .map(|i| ["Ng", "Ortiz", "Park", "Quinn"][i % 4].to_string())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Email".into(),
            (0..n)
                .map(|i| format!("student{}@uni.edu", i))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Gender".into(),
            (0..n)
                .map(|i| if i % 2 == 0 { "Female" } else { "Male" })
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Age".into(),
            (0..n).map(|i| 18 + (i % 7) as i64).collect::<Vec<_>>(),
        ),
        Column::new(
            "Department".into(),
            (0..n).map(|i| ["CS", "Math", "Bio"][i % 3]).collect::<Vec<_>>(),
        ),
        Column::new(
            "Attendance (%)".into(),
            (0..n)
                .map(|i| 60.0 + ((i * 7) % 40) as f64)
                .collect::<Vec<_>>(),
        ),
        Column::new("Midterm_Score".into(), midterm_score),
        Column::new("Final_Score".into(), final_score),
        Column::new(
            "Study_Hours_per_Week".into(),
            (0..n)
                .map(|i| 5.0 + ((i * 11) % 25) as f64)
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Extracurricular_Activities".into(),
            (0..n)
                .map(|i| if i % 4 == 0 { "Yes" } else { "No" })
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Internet_Access_at_Home".into(),
            (0..n)
                .map(|i| if i % 5 == 0 { "No" } else { "Yes" })
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Parent_Education_Level".into(),
            (0..n)
                .map(|i| {
                    if i % 10 == 9 {
                        None
                    } else {
                        Some(["High School", "Bachelor's", "Master's", "PhD"][i % 4])
                    }
                })
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Family_Income_Level".into(),
            (0..n)
                .map(|i| ["Low", "Medium", "High"][(i / 3) % 3])
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Stress_Level (1-10)".into(),
            (0..n).map(|i| 1 + (i % 10) as i64).collect::<Vec<_>>(),
        ),
        Column::new(
            "Sleep_Hours_per_Night".into(),
            (0..n)
                .map(|i| 5.0 + (i % 5) as f64 * 0.75)
                .collect::<Vec<_>>(),
        ),
        Column::new("Grade".into(), grade),
    ];

    DataFrame::new(columns).unwrap()
}

/// The student fixture prepared with the Students Grading preset
pub fn prepared_students(scale: bool) -> (Dataset, EncodingRegistry) {
    let raw = create_student_dataframe();
    prepare(&raw, &PrepareOptions::students_grading().with_scale(scale)).unwrap()
}

/// Small frame with known correlation patterns
pub fn create_correlation_test_dataframe() -> DataFrame {
    df! {
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "b" => [2.0f64, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0], // b = 2a
        "c" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0], // c = 11 - a
        "d" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0],
        "k" => [3.0f64; 10], // zero variance
    }
    .unwrap()
}

/// Wide random frame for exercising the matrix correlation path
pub fn create_large_test_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

    let columns: Vec<Column> = (0..cols)
        .map(|i| {
            let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
            Column::new(format!("feature_{}", i).into(), values)
        })
        .collect();

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
