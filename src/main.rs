//! tilewarp - reproject a lat/lng raster tile into a projected map tile
//!
//! This is the main entry point for the tilewarp command-line tool.

use anyhow::Context;
use std::time::Instant;
use tracing::{error, info};

use tilewarp::{
    init_tracing, log_error, log_operation_end, log_operation_start, log_timed_operation,
    reproject_files, Config,
};

fn main() -> anyhow::Result<()> {
    let (config, job) = Config::load().context("failed to load configuration")?;

    init_tracing(&config.log_level);

    info!("Starting tilewarp v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let details = format!(
        "{} -> {} ({})",
        job.source.path.display(),
        job.target.path.display(),
        job.projection
    );
    log_operation_start("reproject", Some(details.as_str()));
    let start = Instant::now();

    let result = log_timed_operation("reproject", || {
        reproject_files(
            &job.source,
            &job.bounds,
            &job.target,
            &job.placement,
            &job.projection,
            &config.engine,
        )
    });
    log_operation_end("reproject", start, result.is_ok());

    let stats = result
        .map_err(|e| {
            log_error(&e, "reproject");
            e
        })
        .with_context(|| format!("failed to reproject {}", details))?;

    info!(
        pixels = stats.pixels,
        no_data = stats.no_data,
        "Wrote {}",
        job.target.path.display()
    );
    Ok(())
}
