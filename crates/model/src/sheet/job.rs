use crate::{
    core::identifiers::SheetId,
    execution::errors::JobSpecError,
    sheet::format::{ExportFormat, PaperSize, SheetFormat},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether an existing file at a planned output path may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    #[default]
    Allow,
    Deny,
}

impl OverwritePolicy {
    /// Maps the `no_overwrite` flag used by job settings.
    pub fn from_no_overwrite(no_overwrite: bool) -> Self {
        if no_overwrite {
            OverwritePolicy::Deny
        } else {
            OverwritePolicy::Allow
        }
    }

    pub fn allows_overwrite(&self) -> bool {
        matches!(self, OverwritePolicy::Allow)
    }
}

pub struct SheetExportJobParams {
    pub sheet_id: SheetId,
    pub format: SheetFormat,
    pub paper_size: Option<PaperSize>,
    pub output_dir: PathBuf,
    pub emit_metadata_copy: bool,
    pub overwrite_policy: OverwritePolicy,
}

/// One sheet export, validated at construction and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SheetExportJob {
    sheet_id: SheetId,
    export: ExportFormat,
    output_dir: PathBuf,
    emit_metadata_copy: bool,
    overwrite_policy: OverwritePolicy,
}

impl SheetExportJob {
    pub fn new(params: SheetExportJobParams) -> Result<Self, JobSpecError> {
        params.sheet_id.validate()?;
        let export = ExportFormat::new(params.format, params.paper_size)?;

        Ok(Self {
            sheet_id: params.sheet_id,
            export,
            output_dir: params.output_dir,
            emit_metadata_copy: params.emit_metadata_copy,
            overwrite_policy: params.overwrite_policy,
        })
    }

    pub fn sheet_id(&self) -> &SheetId {
        &self.sheet_id
    }

    pub fn export(&self) -> &ExportFormat {
        &self.export
    }

    pub fn format(&self) -> SheetFormat {
        self.export.format()
    }

    pub fn paper_size(&self) -> Option<PaperSize> {
        self.export.paper_size()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn emit_metadata_copy(&self) -> bool {
        self.emit_metadata_copy
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite_policy
    }
}
