//! In-memory doubles for the sheet service and the SQL sink.

use async_trait::async_trait;
use connectors::{
    sheets::{
        client::{SheetClient, SheetSessionFactory},
        error::SheetError,
    },
    sql::{base::adapter::SqlSink, base::error::DbError},
};
use model::{
    core::identifiers::SheetId,
    sheet::{
        download::DownloadResult,
        format::ExportFormat,
        page::{SheetPage, SheetRow},
    },
};
use planner::query::ast::common::TableRef;
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

#[derive(Default)]
pub struct CallCounts {
    pub opens: AtomicUsize,
    pub downloads: AtomicUsize,
    pub row_queries: AtomicUsize,
    pub last_page_size: AtomicUsize,
}

impl CallCounts {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn row_queries(&self) -> usize {
        self.row_queries.load(Ordering::SeqCst)
    }

    pub fn last_page_size(&self) -> usize {
        self.last_page_size.load(Ordering::SeqCst)
    }
}

/// Serves a fixed body for downloads and fixed row numbers for row queries.
#[derive(Clone)]
pub struct FakeSheets {
    pub body: Vec<u8>,
    /// File name the download lands under; defaults to `Budget.csv`.
    pub filename: String,
    /// When set, downloads report this failure reason instead.
    pub failure: Option<String>,
    /// Files `(name, contents)` another writer drops into the output
    /// directory while the download runs.
    pub written_meanwhile: Vec<(String, String)>,
    pub row_numbers: Vec<i64>,
    pub counts: Arc<CallCounts>,
}

impl FakeSheets {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.as_bytes().to_vec(),
            filename: "Budget.csv".to_string(),
            failure: None,
            written_meanwhile: Vec::new(),
            row_numbers: Vec::new(),
            counts: Arc::new(CallCounts::default()),
        }
    }

    pub fn with_row_numbers(mut self, row_numbers: &[i64]) -> Self {
        self.row_numbers = row_numbers.to_vec();
        self
    }

    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    pub fn writing_meanwhile(mut self, name: &str, contents: &str) -> Self {
        self.written_meanwhile
            .push((name.to_string(), contents.to_string()));
        self
    }
}

impl SheetSessionFactory for FakeSheets {
    fn open(&self, token: &str) -> Result<Box<dyn SheetClient>, SheetError> {
        self.counts.opens.fetch_add(1, Ordering::SeqCst);
        if token.is_empty() {
            return Err(SheetError::InvalidToken("token is empty".to_string()));
        }
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl SheetClient for FakeSheets {
    async fn get_sheet_as(
        &self,
        _sheet_id: &SheetId,
        _format: &ExportFormat,
        output_dir: &Path,
    ) -> Result<DownloadResult, SheetError> {
        self.counts.downloads.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Ok(DownloadResult::failure(output_dir, reason.clone()));
        }

        for (name, contents) in &self.written_meanwhile {
            tokio::fs::write(output_dir.join(name), contents).await?;
        }
        tokio::fs::write(output_dir.join(&self.filename), &self.body).await?;
        Ok(DownloadResult::success(output_dir, self.filename.clone()))
    }

    async fn get_sheet(
        &self,
        sheet_id: &SheetId,
        page_size: usize,
    ) -> Result<SheetPage, SheetError> {
        self.counts.row_queries.fetch_add(1, Ordering::SeqCst);
        self.counts.last_page_size.store(page_size, Ordering::SeqCst);

        let rows = self
            .row_numbers
            .iter()
            .enumerate()
            .map(|(i, row_number)| SheetRow {
                id: 1000 + i as i64,
                row_number: *row_number,
            })
            .collect();

        Ok(SheetPage {
            id: sheet_id.as_str().parse().ok(),
            name: Some("Budget".to_string()),
            total_row_count: Some(self.row_numbers.len() as u64),
            rows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Exec(String),
    BulkLoad(TableRef, PathBuf),
}

/// Records every call; fails the first `exec` whose SQL contains the
/// configured fragment, or every bulk load when asked to.
#[derive(Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<SinkCall>>,
    pub fail_exec_containing: Option<String>,
    pub fail_bulk_load: bool,
    pub rows_loaded: u64,
}

impl RecordingSink {
    pub fn failing_exec(fragment: &str) -> Self {
        Self {
            fail_exec_containing: Some(fragment.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_bulk_load() -> Self {
        Self {
            fail_bulk_load: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SinkCall::Exec(sql) => Some(sql),
                SinkCall::BulkLoad(..) => None,
            })
            .collect()
    }

    pub fn bulk_loads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, SinkCall::BulkLoad(..)))
            .count()
    }
}

#[async_trait]
impl SqlSink for RecordingSink {
    async fn exec(&self, query: &str) -> Result<(), DbError> {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Exec(query.to_string()));

        match &self.fail_exec_containing {
            Some(fragment) if query.contains(fragment.as_str()) => {
                Err(DbError::Io(std::io::Error::other(format!(
                    "rejected: {query}"
                ))))
            }
            _ => Ok(()),
        }
    }

    async fn bulk_load(&self, table: &TableRef, path: &Path) -> Result<u64, DbError> {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::BulkLoad(table.clone(), path.to_path_buf()));

        if self.fail_bulk_load {
            return Err(DbError::Io(std::io::Error::other("copy rejected")));
        }
        Ok(self.rows_loaded)
    }
}
