use crate::error::{JobError, LoadStage};
use connectors::sql::base::{adapter::SqlSink, error::DbError};
use model::execution::target::TableSyncTarget;
use planner::{
    query::{builder::truncate::TruncateBuilder, dialect::Postgres, renderer::render_with},
    table_ref,
};
use std::path::Path;
use tracing::{error, info};

/// How a table's contents are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    /// Truncate, then bulk load. A failed load leaves the table empty.
    #[default]
    Direct,
    /// Truncate and bulk load inside one transaction; on failure the
    /// previous contents stay in place.
    Atomic,
}

impl ReplaceMode {
    pub fn from_atomic_flag(atomic: bool) -> Self {
        if atomic {
            ReplaceMode::Atomic
        } else {
            ReplaceMode::Direct
        }
    }
}

/// Replaces a table's contents with an enriched CSV file.
pub struct TableLoader<'a> {
    sink: &'a dyn SqlSink,
    mode: ReplaceMode,
}

impl<'a> TableLoader<'a> {
    pub fn new(sink: &'a dyn SqlSink, mode: ReplaceMode) -> Self {
        Self { sink, mode }
    }

    /// Returns the number of rows loaded.
    pub async fn load(&self, target: &TableSyncTarget, csv_path: &Path) -> Result<u64, JobError> {
        match self.mode {
            ReplaceMode::Direct => self.replace(target, csv_path).await,
            ReplaceMode::Atomic => self.replace_atomically(target, csv_path).await,
        }
    }

    async fn replace(&self, target: &TableSyncTarget, csv_path: &Path) -> Result<u64, JobError> {
        let table = table_ref!(target.schema, target.table_name);
        let truncate = render_with(&TruncateBuilder::new(table.clone()).build(), &Postgres);

        self.sink
            .exec(&truncate)
            .await
            .map_err(load_failed(target, LoadStage::Truncate))?;

        let rows = self
            .sink
            .bulk_load(&table, csv_path)
            .await
            .map_err(load_failed(target, LoadStage::BulkLoad))?;

        info!(
            "Loaded {} rows from {} into {}",
            rows,
            csv_path.display(),
            target.qualified_name()
        );
        Ok(rows)
    }

    async fn replace_atomically(
        &self,
        target: &TableSyncTarget,
        csv_path: &Path,
    ) -> Result<u64, JobError> {
        self.sink
            .exec("BEGIN")
            .await
            .map_err(load_failed(target, LoadStage::Begin))?;

        let replaced = match self.replace(target, csv_path).await {
            Ok(rows) => self
                .sink
                .exec("COMMIT")
                .await
                .map(|_| rows)
                .map_err(load_failed(target, LoadStage::Commit)),
            Err(err) => Err(err),
        };

        if replaced.is_err() {
            if let Err(rollback) = self.sink.exec("ROLLBACK").await {
                error!(
                    "Rollback of {} failed: {}",
                    target.qualified_name(),
                    rollback
                );
            }
        }
        replaced
    }
}

fn load_failed(target: &TableSyncTarget, stage: LoadStage) -> impl FnOnce(DbError) -> JobError {
    let table = target.qualified_name();
    move |source| JobError::LoadFailed {
        table,
        stage,
        source,
    }
}
