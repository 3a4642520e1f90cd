//! Job entry points called by the orchestrator. Each call is one job
//! instance: it owns one sheet session and at most one database connection,
//! both dropped before the call returns.

use crate::{error::RuntimeError, execution::factory::JobEnv};
use engine_config::settings::{
    sheet::{SheetToFileSettings, SheetToTableSettings},
    views::ViewTransformSettings,
};
use engine_core::{
    enrich::RowEnricher,
    export::SheetExporter,
    load::{ReplaceMode, TableLoader},
    views::{executor::ViewExecutor, source::ViewSource},
};
use model::core::identifiers::RunId;
use std::path::PathBuf;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// What a sheet-to-table run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSyncOutcome {
    pub export_path: PathBuf,
    pub enriched_path: PathBuf,
    pub rows_loaded: u64,
}

fn new_run_id() -> RunId {
    RunId::new(Uuid::new_v4().to_string())
}

/// Downloads a sheet and returns the path it was written to.
pub async fn run_sheet_to_file(
    env: &JobEnv,
    settings: &SheetToFileSettings,
) -> Result<PathBuf, RuntimeError> {
    let span = info_span!("sheet_to_file", run_id = %new_run_id(), sheet_id = %settings.sheet_id);
    sheet_to_file(env, settings).instrument(span).await
}

/// Downloads a sheet as CSV, adds row numbers and replaces the target
/// table's contents with the result.
pub async fn run_sheet_to_table(
    env: &JobEnv,
    settings: &SheetToTableSettings,
) -> Result<TableSyncOutcome, RuntimeError> {
    let span = info_span!(
        "sheet_to_table",
        run_id = %new_run_id(),
        sheet_id = %settings.sheet_id,
        table = %settings.table_name
    );
    sheet_to_table(env, settings).instrument(span).await
}

/// Ensures the configured views exist and runs their transforms. Returns
/// the number of views handled.
pub async fn run_view_transforms(
    env: &JobEnv,
    settings: &ViewTransformSettings,
) -> Result<usize, RuntimeError> {
    let span = info_span!("view_transforms", run_id = %new_run_id());
    view_transforms(env, settings).instrument(span).await
}

async fn sheet_to_file(
    env: &JobEnv,
    settings: &SheetToFileSettings,
) -> Result<PathBuf, RuntimeError> {
    let job = settings.to_job()?;
    info!(
        "Exporting sheet {} as {} to {}",
        job.sheet_id(),
        job.format(),
        job.output_dir().display()
    );

    let exporter = SheetExporter::new(env.credentials(), env.sessions.clone());
    let exported = exporter.export(&job, settings.token.as_deref()).await?;
    Ok(exported.path)
}

async fn sheet_to_table(
    env: &JobEnv,
    settings: &SheetToTableSettings,
) -> Result<TableSyncOutcome, RuntimeError> {
    let job = settings.to_job()?;
    let target = settings.target()?;
    let url = env.connection_url(&target.connection_ref)?;
    info!(
        "Syncing sheet {} into {}",
        job.sheet_id(),
        target.qualified_name()
    );

    let exporter = SheetExporter::new(env.credentials(), env.sessions.clone());
    let (exported, session) = exporter
        .export_in_session(&job, settings.token.as_deref())
        .await?;

    let enriched_path = RowEnricher::new(session.as_ref())
        .enrich(&exported.path, job.sheet_id(), None)
        .await?;
    drop(session);

    let sink = env
        .connect(&target.connection_ref, &url, &target.database)
        .await?;
    let mode = ReplaceMode::from_atomic_flag(settings.atomic_replace);
    let rows_loaded = TableLoader::new(sink.as_ref(), mode)
        .load(&target, &enriched_path)
        .await?;

    Ok(TableSyncOutcome {
        export_path: exported.path,
        enriched_path,
        rows_loaded,
    })
}

async fn view_transforms(
    env: &JobEnv,
    settings: &ViewTransformSettings,
) -> Result<usize, RuntimeError> {
    let source = ViewSource::resolve(settings)?;
    let url = env.connection_url(&settings.postgres_conn_id)?;

    let specs = source.load_specs().await?;
    if specs.is_empty() {
        return Ok(0);
    }

    let sink = env
        .connect(&settings.postgres_conn_id, &url, &settings.postgres_database)
        .await?;
    let applied = ViewExecutor::new(sink.as_ref()).apply_all(&specs).await?;
    Ok(applied)
}
