/// Record field names as they appear in the scraped business-contact JSON.
pub const BUSINESS_NAME_FIELD: &str = "Business Name";
pub const PHONE_NUMBER_FIELD: &str = "Phone Number";
pub const EMAILS_FIELD: &str = "Emails";
pub const POSTCODE_FIELD: &str = "Postcode";

/// Separator between business name and phone inside a composite key
pub const KEY_SEPARATOR: &str = "_";

// Default paths, relative to the working directory
pub const DEFAULT_INPUT_DIR: &str = "data";
pub const DEFAULT_OUTPUT_WITH_EMAIL: &str = "records_with_email.json";
pub const DEFAULT_OUTPUT_WITHOUT_EMAIL: &str = "records_without_email.json";
pub const DEFAULT_OUTPUT_ALL_UNIQUE: &str = "all_unique_records.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const INPUT_FILE_PATTERN: &str = "*.json";

// Environment overrides
pub const ENV_INPUT_DIR: &str = "DEDUP_INPUT_DIR";
pub const ENV_OUTPUT_WITH_EMAIL: &str = "DEDUP_OUTPUT_WITH_EMAIL";
pub const ENV_OUTPUT_WITHOUT_EMAIL: &str = "DEDUP_OUTPUT_WITHOUT_EMAIL";
pub const ENV_OUTPUT_ALL_UNIQUE: &str = "DEDUP_OUTPUT_ALL_UNIQUE";
pub const ENV_SUMMARY_FILE: &str = "DEDUP_SUMMARY_FILE";
pub const ENV_START_INDEX: &str = "DEDUP_START_INDEX";
pub const ENV_END_INDEX: &str = "DEDUP_END_INDEX";

// Metric names
pub const METRIC_FILES_PROCESSED: &str = "dedup_files_processed_total";
pub const METRIC_FILES_SKIPPED: &str = "dedup_files_skipped_total";
pub const METRIC_INPUT_RECORDS: &str = "dedup_input_records_total";
pub const METRIC_PHONES_NORMALIZED: &str = "dedup_phones_normalized_total";
pub const METRIC_UNIQUE_RECORDS: &str = "dedup_unique_records_total";
pub const METRIC_DUPLICATES_REMOVED: &str = "dedup_duplicates_removed_total";
pub const METRIC_RUN_DURATION: &str = "dedup_run_duration_seconds";
