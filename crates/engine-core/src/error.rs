use connectors::{sheets::error::SheetError, sql::base::error::DbError};
use engine_config::error::ConfigError;
use model::{core::identifiers::SheetId, execution::errors::JobSpecError};
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Step of a table replace that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Begin,
    Truncate,
    BulkLoad,
    Commit,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            LoadStage::Begin => "begin",
            LoadStage::Truncate => "truncate",
            LoadStage::BulkLoad => "bulk load",
            LoadStage::Commit => "commit",
        };
        f.write_str(stage)
    }
}

/// Terminal failure of one job instance. Nothing is retried at this layer.
#[derive(Debug, Error)]
pub enum JobError {
    /// A required credential or setting is absent.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The overwrite policy forbids replacing an existing output file.
    #[error("Cannot write to {}: the file exists and overwriting is not allowed", .0.display())]
    OutputConflict(PathBuf),

    /// The sheet service reported a non-success download status.
    #[error("Download of sheet {sheet_id} was unsuccessful: {reason}")]
    DownloadFailed { sheet_id: SheetId, reason: String },

    /// Exported rows and service-reported row numbers do not line up.
    #[error(
        "Sheet {sheet_id}: export has {expected} data rows but the service reported {actual} row numbers"
    )]
    RowCountMismatch {
        sheet_id: SheetId,
        expected: usize,
        actual: usize,
    },

    /// Truncate or bulk load failed; the table may be left empty.
    #[error("Loading {table} failed at {stage}: {source}")]
    LoadFailed {
        table: String,
        stage: LoadStage,
        #[source]
        source: DbError,
    },

    /// No view source was supplied.
    #[error(
        "No view configuration supplied: set a document directory, a document file, or both view_name and view_as"
    )]
    MissingConfiguration,

    #[error("View {view} failed: {source}")]
    ViewFailed {
        view: String,
        #[source]
        source: DbError,
    },

    #[error("Invalid export {}: {reason}", .path.display())]
    InvalidExport { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to serialize download metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sheet service error: {0}")]
    Remote(#[from] SheetError),

    #[error("Invalid job: {0}")]
    InvalidJob(JobSpecError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl JobError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> JobError {
        let path = path.into();
        move |source| JobError::Io { path, source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>) -> impl FnOnce(csv::Error) -> JobError {
        let path = path.into();
        move |source| JobError::Csv { path, source }
    }
}

impl From<JobSpecError> for JobError {
    fn from(err: JobSpecError) -> Self {
        match err {
            JobSpecError::ConfigurationMissing(what) => JobError::ConfigurationMissing(what),
            other => JobError::InvalidJob(other),
        }
    }
}
