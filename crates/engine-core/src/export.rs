use crate::{
    credentials::CredentialResolver,
    error::JobError,
    paths::{PlannedPaths, check_writable},
};
use connectors::sheets::client::{SheetClient, SheetSessionFactory};
use model::sheet::{
    download::{DownloadResult, DownloadStatus},
    job::SheetExportJob,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info, warn};

/// Files produced by a successful export.
#[derive(Debug, Clone)]
pub struct ExportedSheet {
    pub path: PathBuf,
    pub metadata_path: Option<PathBuf>,
    pub download: DownloadResult,
}

/// Downloads sheets to their planned paths.
///
/// Planned paths are checked against the overwrite policy before a session
/// is opened, so a refused job never talks to the sheet service.
pub struct SheetExporter {
    credentials: CredentialResolver,
    sessions: Arc<dyn SheetSessionFactory>,
}

impl SheetExporter {
    pub fn new(credentials: CredentialResolver, sessions: Arc<dyn SheetSessionFactory>) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    pub async fn export(
        &self,
        job: &SheetExportJob,
        token: Option<&str>,
    ) -> Result<ExportedSheet, JobError> {
        let (exported, _session) = self.export_in_session(job, token).await?;
        Ok(exported)
    }

    /// Like [`SheetExporter::export`], handing back the session for
    /// follow-up queries against the same sheet.
    pub async fn export_in_session(
        &self,
        job: &SheetExportJob,
        token: Option<&str>,
    ) -> Result<(ExportedSheet, Box<dyn SheetClient>), JobError> {
        let token = self.credentials.resolve(token)?;

        let paths = PlannedPaths::plan(
            job.sheet_id(),
            job.format(),
            job.output_dir(),
            job.emit_metadata_copy(),
        );
        paths.check_writable(job.overwrite_policy())?;

        let session = self.sessions.open(&token)?;
        let exported = download(session.as_ref(), job, &paths).await?;
        Ok((exported, session))
    }
}

async fn download(
    client: &dyn SheetClient,
    job: &SheetExportJob,
    paths: &PlannedPaths,
) -> Result<ExportedSheet, JobError> {
    tokio::fs::create_dir_all(job.output_dir())
        .await
        .map_err(JobError::io(job.output_dir()))?;

    let result = client
        .get_sheet_as(job.sheet_id(), job.export(), job.output_dir())
        .await?;

    if let DownloadStatus::Failure(reason) = &result.status {
        return Err(JobError::DownloadFailed {
            sheet_id: job.sheet_id().clone(),
            reason: reason.clone(),
        });
    }

    let source = result.source_path();
    debug!(
        "Sheet {} downloaded to {}",
        job.sheet_id(),
        source.display()
    );

    // The policy check ran before the download; look again so files that
    // appeared meanwhile are not replaced.
    let policy = job.overwrite_policy();
    let recheck = if source != paths.primary {
        paths.check_writable(policy)
    } else {
        paths
            .metadata
            .as_deref()
            .map_or(Ok(()), |metadata| check_writable(metadata, policy))
    };
    if let Err(err) = recheck {
        if source != paths.primary {
            if let Err(cleanup) = remove_if_exists(&source).await {
                warn!("Could not remove refused download: {}", cleanup);
            }
        }
        return Err(err);
    }

    if source != paths.primary {
        if policy.allows_overwrite() {
            remove_if_exists(&paths.primary).await?;
        }
        tokio::fs::rename(&source, &paths.primary)
            .await
            .map_err(JobError::io(&source))?;
    }

    if let Some(metadata_path) = &paths.metadata {
        check_writable(metadata_path, policy)?;
        let json = serde_json::to_string_pretty(&result)?;
        tokio::fs::write(metadata_path, json)
            .await
            .map_err(JobError::io(metadata_path))?;
    }

    info!(
        "Exported sheet {} as {} to {}",
        job.sheet_id(),
        job.format(),
        paths.primary.display()
    );

    Ok(ExportedSheet {
        path: paths.primary.clone(),
        metadata_path: paths.metadata.clone(),
        download: result,
    })
}

async fn remove_if_exists(path: &Path) -> Result<(), JobError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(JobError::Io {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}
