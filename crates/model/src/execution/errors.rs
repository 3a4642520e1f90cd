use crate::sheet::format::{PaperSize, SheetFormat};
use thiserror::Error;

/// Validation errors raised while constructing a job, before any I/O.
#[derive(Debug, Error)]
pub enum JobSpecError {
    /// A value the job cannot run without was not supplied.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("paper size {size} is only valid for PDF exports, not {format}")]
    UnexpectedPaperSize { format: SheetFormat, size: PaperSize },

    /// The id cannot be used as a file name or URL path segment.
    #[error("invalid sheet id {0:?}: path separators, '..', '?' and '#' are not allowed")]
    InvalidSheetId(String),

    #[error("unknown sheet format: {0}")]
    UnknownFormat(String),

    #[error("unknown paper size: {0}")]
    UnknownPaperSize(String),
}
