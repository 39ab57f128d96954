//! Logging utilities for tilewarp.
//!
//! This module provides structured logging helpers so that reprojection runs
//! are searchable by operation id, projection and timing.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::engine::ProjectStats;

/// Initialize the tracing subscriber with the given log level.
/// `RUST_LOG`, when set, takes precedence.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Run `f`, logging its duration under a fresh operation id
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log a summary of a finished reprojection
pub fn log_reprojection_stats(
    projection: &str,
    method: &str,
    format: &str,
    source_shape: (usize, usize),
    target_shape: (usize, usize),
    stats: &ProjectStats,
    start_time: Instant,
) {
    let coverage = if stats.pixels == 0 {
        0.0
    } else {
        (stats.pixels - stats.no_data) as f64 / stats.pixels as f64
    };

    info!(
        operation = "reproject",
        projection = projection,
        method = method,
        format = format,
        source_rows = source_shape.0,
        source_cols = source_shape.1,
        target_rows = target_shape.0,
        target_cols = target_shape.1,
        pixels = stats.pixels,
        no_data = stats.no_data,
        coverage = coverage,
        duration_ms = start_time.elapsed().as_secs_f64() * 1000.0,
        "Tile reprojected"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::TilewarpError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
