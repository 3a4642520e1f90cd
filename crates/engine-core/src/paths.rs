//! Where a job writes, decided before anything is downloaded.

use crate::error::JobError;
use model::{
    core::identifiers::SheetId,
    sheet::{format::SheetFormat, job::OverwritePolicy},
};
use std::path::{Path, PathBuf};

/// Output locations of one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPaths {
    /// `{output_dir}/{sheet_id}.{extension}`
    pub primary: PathBuf,
    /// `{output_dir}/{sheet_id}.json`, when a metadata copy was requested.
    pub metadata: Option<PathBuf>,
}

impl PlannedPaths {
    pub fn plan(
        sheet_id: &SheetId,
        format: SheetFormat,
        output_dir: &Path,
        emit_metadata_copy: bool,
    ) -> Self {
        let primary = output_dir.join(format!("{}.{}", sheet_id, format.extension()));
        let metadata = emit_metadata_copy.then(|| output_dir.join(format!("{sheet_id}.json")));
        Self { primary, metadata }
    }

    /// Fails on the first planned path the policy forbids replacing.
    pub fn check_writable(&self, policy: OverwritePolicy) -> Result<(), JobError> {
        check_writable(&self.primary, policy)?;
        if let Some(metadata) = &self.metadata {
            check_writable(metadata, policy)?;
        }
        Ok(())
    }
}

/// `{output_dir}/{sheet_id}_enriched.csv`
pub fn enriched_path(output_dir: &Path, sheet_id: &SheetId) -> PathBuf {
    output_dir.join(format!("{sheet_id}_enriched.csv"))
}

pub fn check_writable(path: &Path, policy: OverwritePolicy) -> Result<(), JobError> {
    if !policy.allows_overwrite() && path.exists() {
        return Err(JobError::OutputConflict(path.to_path_buf()));
    }
    Ok(())
}
