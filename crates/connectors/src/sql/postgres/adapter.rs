use crate::sql::{
    base::{
        adapter::SqlSink,
        error::{ConnectorError, DbError},
    },
    postgres::utils::{connect_client, parse_config},
};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{SinkExt, StreamExt, pin_mut};
use planner::query::{
    ast::common::TableRef, builder::copy::CopyBuilder, dialect, renderer::render_with,
};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;
use tokio_postgres::Client;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// A single PostgreSQL connection. The connection closes when the last
/// clone of the adapter is dropped.
#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Client>>,
    dialect: dialect::Postgres,
}

impl PgAdapter {
    pub async fn connect(url: &str, database: Option<&str>) -> Result<Self, ConnectorError> {
        let config = parse_config(url, database)?;
        let client = Arc::new(RwLock::new(connect_client(config).await?));
        Ok(PgAdapter {
            client,
            dialect: dialect::Postgres,
        })
    }
}

#[async_trait]
impl SqlSink for PgAdapter {
    async fn exec(&self, query: &str) -> Result<(), DbError> {
        let client = self.client.read().await;
        client.batch_execute(query).await?;
        Ok(())
    }

    async fn bulk_load(&self, table: &TableRef, path: &Path) -> Result<u64, DbError> {
        let copy = CopyBuilder::new(table.clone()).csv_with_header().build();
        let statement = render_with(&copy, &self.dialect);
        debug!("COPY statement: {}", statement);

        let file = tokio::fs::File::open(path).await?;
        let mut chunks = ReaderStream::new(file);

        let client = self.client.read().await;
        let sink = client.copy_in::<_, Bytes>(statement.as_str()).await?;
        pin_mut!(sink);

        while let Some(chunk) = chunks.next().await {
            sink.as_mut().send(chunk?).await?;
        }

        let rows = sink.as_mut().finish().await?;
        Ok(rows)
    }
}
