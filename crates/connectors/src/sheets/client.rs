use crate::sheets::error::SheetError;
use async_trait::async_trait;
use model::{
    core::identifiers::SheetId,
    sheet::{download::DownloadResult, format::ExportFormat, page::SheetPage},
};
use std::path::Path;

/// An authenticated session against the sheet-hosting service.
#[async_trait]
pub trait SheetClient: Send + Sync {
    /// Downloads the sheet in the requested format into `output_dir`.
    ///
    /// A rejected download is reported through [`DownloadResult::status`],
    /// not as an `Err`; `Err` is reserved for transport and local I/O
    /// failures.
    async fn get_sheet_as(
        &self,
        sheet_id: &SheetId,
        format: &ExportFormat,
        output_dir: &Path,
    ) -> Result<DownloadResult, SheetError>;

    /// Fetches row metadata for the first `page_size` rows.
    async fn get_sheet(&self, sheet_id: &SheetId, page_size: usize)
    -> Result<SheetPage, SheetError>;
}

/// Opens sessions from an access token. Opening is local; no request is
/// sent until the returned client is used.
pub trait SheetSessionFactory: Send + Sync {
    fn open(&self, token: &str) -> Result<Box<dyn SheetClient>, SheetError>;
}
