use connectors::sql::base::error::ConnectorError;
use engine_config::error::ConfigError;
use engine_core::error::JobError;
use thiserror::Error;

/// Errors surfaced to the orchestrator for one job run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The job settings could not be turned into a valid job.
    #[error("Invalid job settings: {0}")]
    Settings(#[from] ConfigError),

    #[error(transparent)]
    Job(#[from] JobError),

    /// Opening the database connection failed.
    #[error("Connection {connection} failed: {source}")]
    Connect {
        connection: String,
        #[source]
        source: ConnectorError,
    },
}
