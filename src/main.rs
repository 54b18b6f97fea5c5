use anyhow::Context;
use clap::Parser;
use contact_dedup::constants::DEFAULT_LOG_DIR;
use contact_dedup::{logging, Config, Pipeline};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "contact_dedup")]
#[command(about = "Deduplicate scraped business-contact records and split them by email presence")]
#[command(version)]
struct Cli {
    /// TOML config file; CLI flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the *.json input files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Output file for records with a non-empty Emails field
    #[arg(long)]
    with_email: Option<PathBuf>,

    /// Output file for records without an email
    #[arg(long)]
    without_email: Option<PathBuf>,

    /// Output file for every deduplicated record
    #[arg(long)]
    all_unique: Option<PathBuf>,

    /// Also write the run summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Only load business_data_<N> files with N >= this
    #[arg(long)]
    start_index: Option<u64>,

    /// Only load business_data_<N> files with N <= this
    #[arg(long)]
    end_index: Option<u64>,

    /// Order each output by Postcode
    #[arg(long)]
    sort_by_postcode: bool,

    /// Warn about and skip malformed input files instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Directory for the JSON log file
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    /// Log to the console only
    #[arg(long)]
    no_log_file: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let base = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };
        let mut config = base.with_env_overrides().context("reading DEDUP_* environment")?;

        if let Some(v) = self.input_dir {
            config.input_dir = v;
        }
        if let Some(v) = self.with_email {
            config.output_with_email = v;
        }
        if let Some(v) = self.without_email {
            config.output_without_email = v;
        }
        if let Some(v) = self.all_unique {
            config.output_all_unique = v;
        }
        if let Some(v) = self.summary {
            config.summary_file = Some(v);
        }
        if self.start_index.is_some() {
            config.start_index = self.start_index;
        }
        if self.end_index.is_some() {
            config.end_index = self.end_index;
        }
        config.sort_by_postcode |= self.sort_by_postcode;
        config.skip_malformed |= self.skip_malformed;

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let log_dir = (!cli.no_log_file).then(|| cli.log_dir.clone());
    let _log_guard = logging::init_logging(log_dir.as_deref());

    let config = cli.into_config()?;

    let result = match Pipeline::run(&config) {
        Ok(result) => result,
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e).context("deduplication run failed");
        }
    };

    println!("\n📊 Deduplication Results:");
    println!("   Files processed: {}", result.files_processed);
    if result.files_skipped > 0 {
        println!("   Files skipped: {}", result.files_skipped);
    }
    println!("   Total input records: {}", result.total_input_records);
    println!("   Unique records: {}", result.unique_records);
    println!("   Records with email: {}", result.records_with_email);
    println!("   Records without email: {}", result.records_without_email);
    println!("   Duplicates removed: {}", result.duplicates_removed);

    Ok(())
}
