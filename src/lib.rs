pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{DedupError, Result};
pub use pipeline::{Pipeline, PipelineResult};
pub use types::Record;
