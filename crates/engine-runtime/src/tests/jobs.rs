#[cfg(test)]
mod tests {
    use crate::{
        error::RuntimeError,
        execution::{
            factory::{JobEnv, SinkConnector},
            jobs::{run_sheet_to_file, run_sheet_to_table, run_view_transforms},
        },
    };
    use async_trait::async_trait;
    use connectors::{
        sheets::{
            client::{SheetClient, SheetSessionFactory},
            error::SheetError,
        },
        sql::base::{
            adapter::SqlSink,
            error::{ConnectorError, DbError},
        },
    };
    use engine_config::{
        defaults::{ACCESS_TOKEN_KEY, connection_key},
        env::{ConfigStore, EnvContext},
        settings::{
            from_yaml_str,
            sheet::{SheetToFileSettings, SheetToTableSettings},
            views::ViewTransformSettings,
        },
    };
    use engine_core::error::JobError;
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
        path::Path,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    #[derive(Clone)]
    struct StubSheets {
        csv: &'static str,
        row_numbers: Vec<i64>,
    }

    impl SheetSessionFactory for StubSheets {
        fn open(&self, _token: &str) -> Result<Box<dyn SheetClient>, SheetError> {
            Ok(Box::new(self.clone()))
        }
    }

    #[async_trait]
    impl SheetClient for StubSheets {
        async fn get_sheet_as(
            &self,
            _sheet_id: &SheetId,
            _format: &ExportFormat,
            output_dir: &Path,
        ) -> Result<DownloadResult, SheetError> {
            tokio::fs::write(output_dir.join("Budget.csv"), self.csv).await?;
            Ok(DownloadResult::success(output_dir, "Budget.csv"))
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
                        id: *n * 10,
                        row_number: *n,
                    })
                    .collect(),
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct Journal {
        statements: Mutex<Vec<String>>,
        loads: Mutex<Vec<(TableRef, String)>>,
        connects: AtomicUsize,
    }

    struct JournalSink(Arc<Journal>);

    #[async_trait]
    impl SqlSink for JournalSink {
        async fn exec(&self, query: &str) -> Result<(), DbError> {
            self.0.statements.lock().unwrap().push(query.to_string());
            Ok(())
        }

        async fn bulk_load(&self, table: &TableRef, path: &Path) -> Result<u64, DbError> {
            let body = tokio::fs::read_to_string(path).await?;
            let rows = body.lines().count().saturating_sub(1) as u64;
            self.0.loads.lock().unwrap().push((table.clone(), body));
            Ok(rows)
        }
    }

    struct JournalConnector(Arc<Journal>);

    #[async_trait]
    impl SinkConnector for JournalConnector {
        async fn connect(
            &self,
            _url: &str,
            _database: &str,
        ) -> Result<Box<dyn SqlSink>, ConnectorError> {
            self.0.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(JournalSink(self.0.clone())))
        }
    }

    fn env(sheets: StubSheets, journal: &Arc<Journal>) -> JobEnv {
        let mut config = EnvContext::empty();
        config.set(ACCESS_TOKEN_KEY, "token");
        config.set(
            connection_key("etl_postgres"),
            "postgres://etl@localhost/etl?sslmode=disable",
        );
        let config: Arc<dyn ConfigStore> = Arc::new(config);

        JobEnv {
            config,
            sessions: Arc::new(sheets),
            connector: Arc::new(JournalConnector(journal.clone())),
        }
    }

    fn budget_sheets() -> StubSheets {
        StubSheets {
            csv: "Item,Amount\nRent,100\nFood,200\nTravel,30\n",
            row_numbers: vec![101, 102, 103],
        }
    }

    #[tokio::test]
    async fn test_sheet_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Arc::new(Journal::default());
        let settings: SheetToFileSettings = from_yaml_str(&format!(
            "sheet_id: 42\nsheet_type: csv\noutput_dir: {}\nwith_json: true\n",
            dir.path().display()
        ))
        .unwrap();

        let path = run_sheet_to_file(&env(budget_sheets(), &journal), &settings)
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("42.csv"));
        assert!(dir.path().join("42.json").exists());
        assert_eq!(journal.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sheet_to_table_loads_enriched_rows() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Arc::new(Journal::default());
        let settings: SheetToTableSettings = from_yaml_str(&format!(
            "sheet_id: 42\ntable_name: newtable\noutput_dir: {}\n",
            dir.path().display()
        ))
        .unwrap();

        let outcome = run_sheet_to_table(&env(budget_sheets(), &journal), &settings)
            .await
            .unwrap();

        assert_eq!(outcome.rows_loaded, 3);
        assert_eq!(outcome.enriched_path, dir.path().join("42_enriched.csv"));
        assert_eq!(
            *journal.statements.lock().unwrap(),
            vec![r#"TRUNCATE TABLE "public"."newtable";"#.to_string()]
        );

        let loads = journal.loads.lock().unwrap();
        assert_eq!(loads[0].0, TableRef::new(Some("public"), "newtable"));
        assert!(loads[0].1.starts_with("RowNumber,Item,Amount\n101,Rent,100\n"));
    }

    #[tokio::test]
    async fn test_mismatch_never_connects_to_database() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Arc::new(Journal::default());
        let sheets = StubSheets {
            row_numbers: vec![1, 2],
            ..budget_sheets()
        };
        let settings: SheetToTableSettings = from_yaml_str(&format!(
            "sheet_id: 42\ntable_name: newtable\noutput_dir: {}\n",
            dir.path().display()
        ))
        .unwrap();

        let err = run_sheet_to_table(&env(sheets, &journal), &settings)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Job(JobError::RowCountMismatch { .. })
        ));
        assert_eq!(journal.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_connection_fails_before_download() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Arc::new(Journal::default());
        let settings: SheetToTableSettings = from_yaml_str(&format!(
            "sheet_id: 42\ntable_name: newtable\npostgres_conn_id: reporting\noutput_dir: {}\n",
            dir.path().display()
        ))
        .unwrap();

        let err = run_sheet_to_table(&env(budget_sheets(), &journal), &settings)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Job(JobError::ConfigurationMissing(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_inline_view_transforms() {
        let journal = Arc::new(Journal::default());
        let settings = ViewTransformSettings {
            view_name: Some("v_budget".to_string()),
            view_as: Some("SELECT * FROM public.newtable".to_string()),
            statements: vec!["DELETE FROM public.newtable WHERE \"Item\" IS NULL".to_string()],
            ..Default::default()
        };

        let applied = run_view_transforms(&env(budget_sheets(), &journal), &settings)
            .await
            .unwrap();

        assert_eq!(applied, 1);
        let statements = journal.statements.lock().unwrap();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].contains("CREATE VIEW v_budget AS (SELECT * FROM public.newtable)"));
    }

    #[tokio::test]
    async fn test_views_without_configuration() {
        let journal = Arc::new(Journal::default());
        let err = run_view_transforms(
            &env(budget_sheets(), &journal),
            &ViewTransformSettings::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Job(JobError::MissingConfiguration)
        ));
        assert_eq!(journal.connects.load(Ordering::SeqCst), 0);
    }
}
