use crate::{
    error::ConfigError,
    settings::{default_connection, default_database, default_schema},
};
use model::{
    core::identifiers::SheetId,
    execution::target::TableSyncTarget,
    sheet::{
        format::{PaperSize, SheetFormat},
        job::{OverwritePolicy, SheetExportJob, SheetExportJobParams},
    },
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Export a sheet to a local file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetToFileSettings {
    pub sheet_id: SheetId,
    /// `CSV`, `EXCEL` or `PDF`, case-insensitive.
    pub sheet_type: String,
    /// Required for PDF, rejected otherwise.
    #[serde(default)]
    pub paper_size: Option<String>,
    /// Defaults to the OS temp directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Also write the download result as `{sheet_id}.json`.
    #[serde(default)]
    pub with_json: bool,
    #[serde(default)]
    pub no_overwrite: bool,
    /// Overrides the access token from the config store.
    #[serde(default)]
    pub token: Option<String>,
}

impl SheetToFileSettings {
    pub fn to_job(&self) -> Result<SheetExportJob, ConfigError> {
        let format = self.sheet_type.parse::<SheetFormat>()?;
        let paper_size = self
            .paper_size
            .as_deref()
            .map(str::parse::<PaperSize>)
            .transpose()?;

        let job = SheetExportJob::new(SheetExportJobParams {
            sheet_id: self.sheet_id.clone(),
            format,
            paper_size,
            output_dir: resolve_output_dir(self.output_dir.as_ref()),
            emit_metadata_copy: self.with_json,
            overwrite_policy: OverwritePolicy::from_no_overwrite(self.no_overwrite),
        })?;
        Ok(job)
    }
}

/// Export a sheet as CSV, enrich it with row numbers and replace a table's
/// contents with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetToTableSettings {
    pub sheet_id: SheetId,
    pub table_name: String,
    #[serde(default = "default_connection")]
    pub postgres_conn_id: String,
    #[serde(default = "default_database")]
    pub postgres_database: String,
    #[serde(default = "default_schema")]
    pub postgres_schema: String,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub with_json: bool,
    #[serde(default)]
    pub no_overwrite: bool,
    #[serde(default)]
    pub token: Option<String>,
    /// Run truncate and load in one transaction.
    #[serde(default)]
    pub atomic_replace: bool,
}

impl SheetToTableSettings {
    pub fn to_job(&self) -> Result<SheetExportJob, ConfigError> {
        let job = SheetExportJob::new(SheetExportJobParams {
            sheet_id: self.sheet_id.clone(),
            format: SheetFormat::Csv,
            paper_size: None,
            output_dir: resolve_output_dir(self.output_dir.as_ref()),
            emit_metadata_copy: self.with_json,
            overwrite_policy: OverwritePolicy::from_no_overwrite(self.no_overwrite),
        })?;
        Ok(job)
    }

    pub fn target(&self) -> Result<TableSyncTarget, ConfigError> {
        let target = TableSyncTarget::new(
            &self.postgres_conn_id,
            &self.postgres_database,
            &self.postgres_schema,
            &self.table_name,
        )?;
        Ok(target)
    }
}

fn resolve_output_dir(configured: Option<&PathBuf>) -> PathBuf {
    configured.cloned().unwrap_or_else(std::env::temp_dir)
}
