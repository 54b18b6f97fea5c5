// Contact dedup pipeline: ingestion, processing, and output

pub mod ingestion;
pub mod output;
pub mod processing;

use crate::config::Config;
use crate::constants::*;
use crate::error::Result;
use crate::types::Record;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use processing::conflation::{self, ConflationResult};
use processing::normalize::{Normalizer, PhoneNormalizer};
use processing::partition::{self, Partitioned};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};

/// Counters from a complete pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub total_input_records: usize,
    pub phones_normalized: usize,
    pub unique_records: usize,
    pub records_with_email: usize,
    pub records_without_email: usize,
    pub duplicates_removed: usize,
    pub finished_at: DateTime<Utc>,
}

/// Everything the processing stages produce, before anything is written
#[derive(Debug)]
pub struct ProcessedRecords {
    pub partitioned: Partitioned,
    pub phones_normalized: usize,
    pub replaced: usize,
}

pub struct Pipeline;

impl Pipeline {
    /// Load, normalize, deduplicate, partition, and write.
    #[instrument(skip(config), fields(input_dir = %config.input_dir.display()))]
    pub fn run(config: &Config) -> Result<PipelineResult> {
        config.validate()?;
        let started = Instant::now();

        // Step 1: Load
        let loaded = ingestion::load_records(config)?;
        counter!(METRIC_FILES_PROCESSED).increment(loaded.files_processed as u64);
        counter!(METRIC_FILES_SKIPPED).increment(loaded.files_skipped as u64);
        counter!(METRIC_INPUT_RECORDS).increment(loaded.total_input_records as u64);

        // Step 2-4: Normalize, deduplicate, partition
        let processed = Self::process(loaded.records, config.sort_by_postcode);
        let parts = &processed.partitioned;

        // Step 5: Write
        output::write_json(&config.output_with_email, &parts.with_email)?;
        output::write_json(&config.output_without_email, &parts.without_email)?;
        output::write_json(&config.output_all_unique, &parts.all_unique)?;
        info!(
            with_email = %config.output_with_email.display(),
            without_email = %config.output_without_email.display(),
            all_unique = %config.output_all_unique.display(),
            "Wrote output files"
        );

        let unique_records = parts.all_unique.len();
        let result = PipelineResult {
            files_processed: loaded.files_processed,
            files_skipped: loaded.files_skipped,
            total_input_records: loaded.total_input_records,
            phones_normalized: processed.phones_normalized,
            unique_records,
            records_with_email: parts.with_email.len(),
            records_without_email: parts.without_email.len(),
            duplicates_removed: loaded.total_input_records.saturating_sub(unique_records),
            finished_at: Utc::now(),
        };

        if let Some(summary_file) = &config.summary_file {
            output::write_json(summary_file, &result)?;
        }

        counter!(METRIC_PHONES_NORMALIZED).increment(result.phones_normalized as u64);
        counter!(METRIC_UNIQUE_RECORDS).increment(result.unique_records as u64);
        counter!(METRIC_DUPLICATES_REMOVED).increment(result.duplicates_removed as u64);
        histogram!(METRIC_RUN_DURATION).record(started.elapsed().as_secs_f64());

        info!("Total input records: {}", result.total_input_records);
        info!("Unique records after deduplication: {}", result.unique_records);
        info!("Records with email: {}", result.records_with_email);
        info!("Records without email: {}", result.records_without_email);
        info!("Duplicates removed: {}", result.duplicates_removed);

        Ok(result)
    }

    /// The in-memory part of a run: phone normalization, dedup, and partitioning.
    pub fn process(records: Vec<Record>, sort_by_postcode: bool) -> ProcessedRecords {
        let normalizer = PhoneNormalizer;
        let mut phones_normalized = 0;

        let normalized = records.into_iter().map(|mut record| {
            if normalizer.normalize(&mut record) {
                phones_normalized += 1;
            }
            record
        });
        let ConflationResult {
            records, replaced, ..
        } = conflation::deduplicate(normalized);

        let mut partitioned = partition::partition(records);
        if sort_by_postcode {
            partitioned.sort_by_postcode();
        }

        ProcessedRecords {
            partitioned,
            phones_normalized,
            replaced,
        }
    }
}
