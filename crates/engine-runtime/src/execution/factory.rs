use crate::error::RuntimeError;
use async_trait::async_trait;
use connectors::{
    sheets::{client::SheetSessionFactory, smartsheet::SmartsheetSessions},
    sql::{
        base::{adapter::SqlSink, error::ConnectorError},
        postgres::adapter::PgAdapter,
    },
};
use engine_config::{
    defaults::{API_BASE_KEY, connection_key},
    env::ConfigStore,
};
use engine_core::{credentials::CredentialResolver, error::JobError};
use std::sync::Arc;

/// Opens the database connection a job writes through.
#[async_trait]
pub trait SinkConnector: Send + Sync {
    async fn connect(&self, url: &str, database: &str)
    -> Result<Box<dyn SqlSink>, ConnectorError>;
}

/// Connects with [`PgAdapter`].
pub struct PgConnector;

#[async_trait]
impl SinkConnector for PgConnector {
    async fn connect(
        &self,
        url: &str,
        database: &str,
    ) -> Result<Box<dyn SqlSink>, ConnectorError> {
        let adapter = PgAdapter::connect(url, Some(database)).await?;
        Ok(Box::new(adapter))
    }
}

/// Everything a job needs from outside: configuration and the two
/// collaborators it opens sessions with.
#[derive(Clone)]
pub struct JobEnv {
    pub config: Arc<dyn ConfigStore>,
    pub sessions: Arc<dyn SheetSessionFactory>,
    pub connector: Arc<dyn SinkConnector>,
}

impl JobEnv {
    /// Smartsheet sessions (base URL from `SMARTSHEET_API_BASE` when set)
    /// and PostgreSQL connections.
    pub fn new(config: Arc<dyn ConfigStore>) -> Self {
        let api_base = config.get_non_empty(API_BASE_KEY);
        let sessions = SmartsheetSessions::new(api_base.as_deref());

        Self {
            config,
            sessions: Arc::new(sessions),
            connector: Arc::new(PgConnector),
        }
    }

    pub fn credentials(&self) -> CredentialResolver {
        CredentialResolver::new(self.config.clone())
    }

    /// URL of a named connection, looked up before any side effect so a
    /// missing entry fails the job early.
    pub fn connection_url(&self, connection_ref: &str) -> Result<String, RuntimeError> {
        let key = connection_key(connection_ref);
        self.config.get_non_empty(&key).ok_or_else(|| {
            RuntimeError::Job(JobError::ConfigurationMissing(format!(
                "connection {connection_ref}: {key} is not set"
            )))
        })
    }

    pub async fn connect(
        &self,
        connection_ref: &str,
        url: &str,
        database: &str,
    ) -> Result<Box<dyn SqlSink>, RuntimeError> {
        self.connector
            .connect(url, database)
            .await
            .map_err(|source| RuntimeError::Connect {
                connection: connection_ref.to_string(),
                source,
            })
    }
}
