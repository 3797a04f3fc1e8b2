//! GradeLens: student performance analysis CLI
//!
//! Loads student records, encodes categorical fields, selects rows with
//! filters, ranks the drivers of a grade with a seeded random forest and
//! reports how the fields correlate.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use gradelens::cli::Cli;
use gradelens::pipeline::{
    correlate, describe, export_view, filter, load_dataset_with_progress, prepare, rank,
    PipelineError,
};
use gradelens::report::{
    display_correlated_pairs, display_importance, display_view_summary, export_analysis,
    AnalysisResults, ExportParams, RunSummary,
};
use gradelens::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning, ConfigCard,
};

/// Turn InsufficientData into `None` with a notice; every other error aborts
fn allow_insufficient<T>(result: Result<T, PipelineError>, step: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_insufficient_data() => {
            print_warning(&format!("Not enough data for {}: {}", step, e));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = cli.prepare_options();
    let predicates = cli.predicates();
    let forest_config = cli.forest_config();
    let report_path = cli.report_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&ConfigCard {
        input: &cli.input,
        target: &cli.target,
        predicates: predicates.len(),
        trees: forest_config.n_trees,
        seed: forest_config.seed,
        correlation_threshold: cli.correlation_threshold,
    });

    // Step 1: Load dataset
    print_step_header(1, "Load Records");
    let step_start = Instant::now();
    let (raw, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;
    print_success("Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let mut summary = RunSummary::new(rows);
    let elapsed = step_start.elapsed();
    summary.record_step("Load", elapsed);
    print_step_time(elapsed);

    // Step 2: Prepare (drop, encode, impute, scale)
    print_step_header(2, "Prepare Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding categorical fields...");
    let (dataset, registry) = prepare(&raw, &options)?;
    finish_with_success(&spinner, "Dataset prepared");

    summary.fields_kept = dataset.schema().len();
    summary.fields_dropped = cols.saturating_sub(summary.fields_kept);
    print_count(
        "categorical field(s) encoded",
        registry.len(),
        Some(&format!("({} numeric)", dataset.schema().numeric_fields().len())),
    );
    if options.scale {
        print_info("Numeric fields standardized to zero mean and unit variance");
    }
    let elapsed = step_start.elapsed();
    summary.record_step("Prepare", elapsed);
    print_step_time(elapsed);

    // Step 3: Select rows
    print_step_header(3, "Select Rows");
    let step_start = Instant::now();
    let view = filter(&dataset, &registry, &predicates)?;
    if predicates.is_empty() {
        print_info("No filters given; analysing every row");
    } else {
        for predicate in &predicates {
            println!("      {} {}", style("•").dim(), predicate);
        }
    }
    summary.rows_selected = view.len();
    print_count("row(s) selected", view.len(), Some(&format!("of {}", rows)));

    let view_summary = describe(&view, &registry)?;
    display_view_summary(&view_summary);
    let elapsed = step_start.elapsed();
    summary.record_step("Select", elapsed);
    print_step_time(elapsed);

    // Step 4: Feature importance
    print_step_header(4, "Feature Importance");
    let step_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Growing {} trees for '{}'...",
        forest_config.n_trees, cli.target
    ));
    let importance = allow_insufficient(rank(&view, &cli.target, &forest_config), "ranking")?;
    match &importance {
        Some(table) => {
            finish_with_success(&spinner, "Importance ranking complete");
            summary.features_ranked = table.len();
            display_importance(table);
        }
        None => finish_with_warning(&spinner, "Importance ranking skipped"),
    }
    let elapsed = step_start.elapsed();
    summary.record_step("Rank", elapsed);
    print_step_time(elapsed);

    // Step 5: Correlation
    print_step_header(5, "Correlation Analysis");
    let step_start = Instant::now();
    let spinner = create_spinner("Calculating correlations...");
    let correlation = allow_insufficient(correlate(&view), "correlation")?;
    match &correlation {
        Some(matrix) => {
            finish_with_success(&spinner, "Correlation analysis complete");
            let pairs = matrix.strongest_pairs(cli.correlation_threshold);
            summary.correlated_pairs = pairs.len();
            if pairs.is_empty() {
                print_info("No strongly correlated field pairs found");
            } else {
                print_count(
                    "correlated pair(s)",
                    pairs.len(),
                    Some(&format!("(|r| > {:.2})", cli.correlation_threshold)),
                );
                display_correlated_pairs(&pairs, cli.top_pairs);
            }
        }
        None => finish_with_warning(&spinner, "Correlation analysis skipped"),
    }
    let elapsed = step_start.elapsed();
    summary.record_step("Correlate", elapsed);
    print_step_time(elapsed);

    // Step 6: Save results
    print_step_header(6, "Save Results");
    let step_start = Instant::now();
    if let Some(path) = &cli.export {
        let spinner = create_spinner("Writing selected rows...");
        export_view(&view, &registry, path, !cli.encoded_export)?;
        finish_with_success(&spinner, &format!("Saved rows to {}", path.display()));
    }

    let input_display = cli.input.display().to_string();
    export_analysis(
        &AnalysisResults {
            schema: dataset.schema(),
            summary: &view_summary,
            importance: importance.as_ref(),
            correlation: correlation.as_ref(),
            encodings: &registry,
        },
        &report_path,
        &ExportParams {
            input_file: &input_display,
            target_column: &cli.target,
            scaled: options.scale,
            filters: &predicates,
            forest: &forest_config,
            correlation_threshold: cli.correlation_threshold,
        },
    )?;
    print_success(&format!("Analysis report saved to {}", report_path.display()));
    let elapsed = step_start.elapsed();
    summary.record_step("Save", elapsed);
    print_step_time(elapsed);

    summary.display();
    print_completion();

    Ok(())
}
