//! Tests for dataset preparation

use gradelens::pipeline::*;
use polars::prelude::*;

mod common;

use common::*;

#[test]
fn test_preset_drops_identifiers_and_keeps_order() {
    let (dataset, _) = prepared_students(false);
    let schema = dataset.schema();

    for field in STUDENT_IDENTIFIER_FIELDS {
        assert!(!schema.contains(field), "{} should be dropped", field);
    }
    assert_eq!(schema.len(), 14);
    assert_eq!(schema.names()[0], "Gender");
    assert_eq!(schema.names()[13], "Grade");
    assert_eq!(dataset.height(), STUDENT_ROWS);
}

#[test]
fn test_field_kinds() {
    let (dataset, _) = prepared_students(false);
    let schema = dataset.schema();

    assert_eq!(schema.kind("Age"), Some(FieldKind::Numeric));
    assert_eq!(schema.kind("Stress_Level (1-10)"), Some(FieldKind::Numeric));
    assert_eq!(schema.kind("Grade"), Some(FieldKind::Categorical));
    assert_eq!(schema.categorical_fields().len(), 7);
    assert_eq!(schema.numeric_fields().len(), 7);
}

#[test]
fn test_unscaled_values_are_preserved() {
    let raw = create_student_dataframe();
    let (dataset, _) = prepare(&raw, &PrepareOptions::students_grading()).unwrap();

    let expected: Vec<f64> = raw
        .column("Final_Score")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(dataset.values("Final_Score").unwrap(), expected);
}

#[test]
fn test_scaling_standardizes_numeric_fields() {
    let (dataset, _) = prepared_students(true);

    for field in dataset.schema().numeric_fields() {
        let values = dataset.values(field).unwrap();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 1e-9, "{} mean {}", field, mean);
        assert!((var.sqrt() - 1.0).abs() < 1e-9, "{} std {}", field, var.sqrt());
    }
}

#[test]
fn test_scaling_leaves_codes_untouched() {
    let (plain, _) = prepared_students(false);
    let (scaled, _) = prepared_students(true);

    assert_eq!(
        plain.codes("Department").unwrap(),
        scaled.codes("Department").unwrap()
    );
}

#[test]
fn test_constant_column_cannot_be_scaled() {
    let raw = df! {
        "Grade" => ["A", "B", "A"],
        "Credits" => [3.0f64, 3.0, 3.0],
    }
    .unwrap();
    let options = PrepareOptions::new(Vec::<String>::new(), ["Grade"], true);

    let err = prepare(&raw, &options).unwrap_err();
    assert!(matches!(err, PipelineError::DegenerateColumn { ref field } if field == "Credits"));

    // Without scaling the same column is fine
    assert!(prepare(&raw, &options.clone().with_scale(false)).is_ok());
}

#[test]
fn test_undeclared_text_column_is_schema_error() {
    let raw = create_student_dataframe();
    let options = PrepareOptions::new(Vec::<String>::new(), ["Grade"], false);

    let err = prepare(&raw, &options).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
    assert!(err.to_string().contains("Student_ID"));
}

#[test]
fn test_categorical_field_must_exist_and_not_be_dropped() {
    let raw = create_student_dataframe();

    let missing = PrepareOptions::new(STUDENT_IDENTIFIER_FIELDS, ["Grade", "Major"], false);
    assert!(matches!(
        prepare(&raw, &missing).unwrap_err(),
        PipelineError::Schema(_)
    ));

    let clash = PrepareOptions::new(["Grade"], ["Grade"], false);
    assert!(matches!(
        prepare(&raw, &clash).unwrap_err(),
        PipelineError::Schema(_)
    ));
}

#[test]
fn test_numeric_nulls_are_imputed_with_mean() {
    let raw = df! {
        "Grade" => ["A", "B", "A", "B"],
        "Study_Hours" => [Some(2.0f64), None, Some(4.0), Some(6.0)],
    }
    .unwrap();
    let options = PrepareOptions::new(Vec::<String>::new(), ["Grade"], false);

    let (dataset, _) = prepare(&raw, &options).unwrap();
    assert_eq!(
        dataset.values("Study_Hours").unwrap(),
        vec![2.0, 4.0, 4.0, 6.0]
    );
}

#[test]
fn test_scaling_empty_dataset_is_insufficient() {
    let raw = create_student_dataframe().head(Some(0));
    let err = prepare(&raw, &PrepareOptions::students_grading().with_scale(true)).unwrap_err();
    assert!(err.is_insufficient_data());
}

#[test]
fn test_dropping_everything_is_schema_error() {
    let raw = df! { "Student_ID" => ["S1", "S2"] }.unwrap();
    let options = PrepareOptions::new(["Student_ID"], Vec::<String>::new(), false);

    assert!(matches!(
        prepare(&raw, &options).unwrap_err(),
        PipelineError::Schema(_)
    ));
}
