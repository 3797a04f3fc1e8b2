//! Tests for dataset loading

use gradelens::pipeline::*;
use std::path::Path;

mod common;

use common::*;

#[test]
fn test_load_csv() {
    let mut df = create_student_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let (loaded, rows, cols, memory_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, STUDENT_ROWS);
    assert_eq!(cols, 18);
    assert!(memory_mb > 0.0);
    assert_has_columns(&loaded, &["Student_ID", "Grade", "Attendance (%)"]);
}

#[test]
fn test_load_parquet() {
    let mut df = create_student_dataframe();
    let (_temp_dir, parquet_path) = create_temp_parquet(&mut df);

    let (_, rows, cols, _) = load_dataset_with_progress(&parquet_path, 100).unwrap();
    assert_eq!((rows, cols), (STUDENT_ROWS, 18));
}

#[test]
fn test_csv_nulls_survive_loading() {
    let mut df = create_student_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let (loaded, _, _, _) = load_dataset_with_progress(&csv_path, 100).unwrap();
    assert_eq!(
        loaded.column("Parent_Education_Level").unwrap().null_count(),
        10
    );
}

#[test]
fn test_loaded_csv_prepares_like_in_memory_frame() {
    let mut df = create_student_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);
    let (loaded, _, _, _) = load_dataset_with_progress(&csv_path, 100).unwrap();

    let options = PrepareOptions::students_grading();
    let (from_file, file_registry) = prepare(&loaded, &options).unwrap();
    let (in_memory, memory_registry) = prepare(&df, &options).unwrap();

    assert_eq!(from_file.schema(), in_memory.schema());
    assert_eq!(file_registry, memory_registry);
    assert_eq!(
        from_file.values("Final_Score").unwrap(),
        in_memory.values("Final_Score").unwrap()
    );
}

#[test]
fn test_get_column_names() {
    let mut df = create_student_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let names = get_column_names(&csv_path).unwrap();
    assert_eq!(names.len(), 18);
    assert_eq!(names[0], "Student_ID");
    assert_eq!(names[17], "Grade");
}

#[test]
fn test_unsupported_format() {
    let err = load_dataset_with_progress(Path::new("students.json"), 100).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_missing_file() {
    assert!(load_dataset_with_progress(Path::new("/nonexistent/students.csv"), 100).is_err());
}
