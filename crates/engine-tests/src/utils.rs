use crate::{TEST_PG_URL, pg_client};
use async_trait::async_trait;
use connectors::sheets::{
    client::{SheetClient, SheetSessionFactory},
    error::SheetError,
};
use engine_config::{
    defaults::{ACCESS_TOKEN_KEY, DEFAULT_PG_CONN, connection_key},
    env::{ConfigStore, EnvContext},
};
use engine_runtime::execution::factory::{JobEnv, PgConnector};
use model::{
    core::identifiers::SheetId,
    sheet::{
        download::DownloadResult,
        format::ExportFormat,
        page::{SheetPage, SheetRow},
    },
};
use std::{path::Path, sync::Arc};

/// Budget sheet with three data rows, one of them holding a quoted comma.
pub const BUDGET_CSV: &str = "Item,Amount\r\nRent,100\r\nFood,\"1,200\"\r\nTravel,30\r\n";

/// Target table for the budget sheet once enriched.
pub const BUDGET_TABLE_DDL: &str = r#"
    CREATE TABLE public.budget (
        "RowNumber" integer NOT NULL,
        "Item" varchar NOT NULL,
        "Amount" varchar NOT NULL
    );
"#;

/// Stands in for the sheet service: serves a fixed CSV body and fixed row
/// numbers.
#[derive(Clone)]
pub struct CannedSheet {
    pub csv: &'static str,
    pub row_numbers: Vec<i64>,
}

impl CannedSheet {
    pub fn budget() -> Self {
        Self {
            csv: BUDGET_CSV,
            row_numbers: vec![101, 102, 103],
        }
    }
}

impl SheetSessionFactory for CannedSheet {
    fn open(&self, _token: &str) -> Result<Box<dyn SheetClient>, SheetError> {
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl SheetClient for CannedSheet {
    async fn get_sheet_as(
        &self,
        sheet_id: &SheetId,
        format: &ExportFormat,
        output_dir: &Path,
    ) -> Result<DownloadResult, SheetError> {
        let filename = format!("{}.download.{}", sheet_id, format.extension());
        tokio::fs::write(output_dir.join(&filename), self.csv).await?;
        Ok(DownloadResult::success(output_dir, filename))
    }

    async fn get_sheet(
        &self,
        _sheet_id: &SheetId,
        _page_size: usize,
    ) -> Result<SheetPage, SheetError> {
        Ok(SheetPage {
            rows: self
                .row_numbers
                .iter()
                .map(|n| SheetRow {
                    id: 9000 + n,
                    row_number: *n,
                })
                .collect(),
            ..Default::default()
        })
    }
}

/// A job environment with a canned sheet and the live test database
/// registered under the default connection name.
pub fn live_env(sheet: CannedSheet) -> JobEnv {
    let mut config = EnvContext::empty();
    config.set(ACCESS_TOKEN_KEY, "test-token");
    config.set(connection_key(DEFAULT_PG_CONN), TEST_PG_URL);
    let config: Arc<dyn ConfigStore> = Arc::new(config);

    JobEnv {
        config,
        sessions: Arc::new(sheet),
        connector: Arc::new(PgConnector),
    }
}

pub async fn execute(sql: &str) {
    pg_client()
        .await
        .batch_execute(sql)
        .await
        .unwrap_or_else(|e| panic!("failed to execute {sql}: {e}"));
}

pub async fn get_row_count(table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {table};");
    pg_client()
        .await
        .query_one(query.as_str(), &[])
        .await
        .unwrap()
        .get(0)
}

pub async fn get_row_numbers(table: &str) -> Vec<i32> {
    let query = format!(r#"SELECT "RowNumber" FROM {table} ORDER BY "RowNumber";"#);
    pg_client()
        .await
        .query(query.as_str(), &[])
        .await
        .unwrap()
        .iter()
        .map(|row| row.get(0))
        .collect()
}

/// Assert that a view exists (or not) in the public schema
pub async fn assert_view_exists(view: &str, should: bool) {
    let exists: bool = pg_client()
        .await
        .query_one(
            r#"
            SELECT EXISTS (
              SELECT 1
                FROM information_schema.views
               WHERE table_schema='public'
                 AND table_name=$1
            );
            "#,
            &[&view],
        )
        .await
        .unwrap()
        .get(0);

    assert_eq!(exists, should, "expected view '{view}' existence == {should}");
}
