//! Batch mode: validate a file of subnets, look each one up, write CSV.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::config::BatchConfig;
use crate::input::validate::{validate_batch_input, ValidationError};
use crate::logger::{percent, progress_bar, BatchReporter};
use crate::models::BatchResult;
use crate::origin::extract::extract_batch_results;
use crate::registry::DataSource;
use crate::report;

/// Fatal batch failures. Per-subnet fetch failures are not errors here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input file is empty")]
    EmptyInput,

    #[error("{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Failed to write output file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub delay: Duration,
    pub progress_interval: usize,
}

impl From<&BatchConfig> for BatchSettings {
    fn from(config: &BatchConfig) -> Self {
        Self {
            delay: config.delay(),
            progress_interval: config.progress_interval.max(1),
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub rows: usize,
}

/// Human-readable, line-numbered report for a rejected batch.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    let mut lines = vec![
        "Validation failed with the following errors:".to_string(),
        String::new(),
    ];
    lines.extend(errors.iter().map(|e| format!("  {}", e)));
    lines.push(String::new());
    lines.push("Please fix these issues and try again.".to_string());
    lines.push(
        "Batch mode only accepts IPv4 and IPv6 subnets in CIDR notation (e.g., 192.168.1.0/24, 2001:db8::/32)"
            .to_string(),
    );
    lines.join("\n")
}

/// Run a whole batch from `input` to `output`.
///
/// Nothing is fetched unless every input line is a valid subnet.
pub async fn process_batch_file<S, R>(
    input: &Path,
    output: &Path,
    source: &S,
    settings: &BatchSettings,
    reporter: &R,
) -> Result<BatchSummary, BatchError>
where
    S: DataSource,
    R: BatchReporter,
{
    reporter.info(&format!("Reading input file: {}", input.display()));
    let content = std::fs::read_to_string(input).map_err(|source| BatchError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Err(BatchError::EmptyInput);
    }

    reporter.info("Validating input format...");
    let batch = validate_batch_input(&content);
    if !batch.is_accepted() {
        reporter.error("Input validation failed");
        return Err(BatchError::Validation(batch.errors));
    }
    reporter.info(&format!(
        "Validation complete: {} valid entries found",
        batch.subnets.len()
    ));

    reporter.info(&format!(
        "Starting processing of {} subnets...",
        batch.subnets.len()
    ));
    let (results, failed) = run_batch(&batch.subnets, source, settings, reporter).await;

    reporter.info(&format!(
        "Writing {} results to: {}",
        results.len(),
        output.display()
    ));
    report::csv::write(&results, output).map_err(|source| BatchError::WriteOutput {
        path: output.to_path_buf(),
        source,
    })?;

    let summary = BatchSummary {
        processed: batch.subnets.len(),
        failed,
        rows: results.len(),
    };

    reporter.info("Batch processing completed successfully!");
    reporter.info(&format!(
        "Processing complete: {} results from {} entries",
        summary.rows, summary.processed
    ));
    if summary.failed > 0 {
        reporter.warn(&format!(
            "{} of {} subnets could not be fetched and have no rows",
            summary.failed, summary.processed
        ));
    }
    reporter.info(&format!("Results saved to: {}", output.display()));

    Ok(summary)
}

/// Look up each subnet in turn. Returns the rows and the number of failed lookups.
pub async fn run_batch<S, R>(
    subnets: &[String],
    source: &S,
    settings: &BatchSettings,
    reporter: &R,
) -> (Vec<BatchResult>, usize)
where
    S: DataSource,
    R: BatchReporter,
{
    let total = subnets.len();
    let mut results = Vec::new();
    let mut failed = 0;

    for (index, subnet) in subnets.iter().enumerate() {
        match source.fetch_prefix(subnet).await {
            Ok(records) => {
                let exact: Vec<_> = records.into_iter().filter(|r| r.prefix == *subnet).collect();
                results.extend(extract_batch_results(&exact));
            }
            Err(e) => {
                failed += 1;
                reporter.error(&format!("Failed to process subnet {}: {}", subnet, e));
            }
        }

        let processed = index + 1;
        reporter.progress(processed, total, subnet);
        if processed % settings.progress_interval == 0 || processed == total {
            let pct = percent(processed, total);
            reporter.info(&format!(
                "{} Progress: {}/{} ({}%) - Processing subnet: {}",
                progress_bar(pct, 20),
                processed,
                total,
                pct,
                subnet
            ));
        }

        if processed < total && !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }
    }

    (results, failed)
}
