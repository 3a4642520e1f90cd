use crate::sql::base::error::DbError;
use async_trait::async_trait;
use planner::query::ast::common::TableRef;
use std::path::Path;

/// The relational sink a job writes into.
///
/// Implementations hold exactly one connection; statements issued through
/// the same sink run in the same session, so `BEGIN`/`COMMIT` sent via
/// [`SqlSink::exec`] bracket later calls.
#[async_trait]
pub trait SqlSink: Send + Sync {
    /// Runs one or more `;`-separated statements.
    async fn exec(&self, query: &str) -> Result<(), DbError>;

    /// Bulk-loads a CSV file whose first line is a header into `table`,
    /// returning the number of rows loaded.
    async fn bulk_load(&self, table: &TableRef, path: &Path) -> Result<u64, DbError>;
}
