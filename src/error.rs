use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarvestError {
    #[error("invalid chromosome identifier: {0}")]
    InvalidChromosome(String),

    #[error("BioMart request failed: {0}")]
    BiomartHttp(String),

    #[error("BioMart returned status {status}: {message}")]
    BiomartStatus { status: u16, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("no data was retrieved for any chromosome")]
    NoDataRetrieved,

    #[error("run interrupted by user")]
    Interrupted,
}

impl HarvestError {
    /// Transport-level failures are the only retryable kind: connection and
    /// timeout errors plus non-2xx responses. Everything else either degrades
    /// to an empty table at the fetch boundary or aborts the run.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HarvestError::BiomartHttp(_) | HarvestError::BiomartStatus { .. }
        )
    }
}
