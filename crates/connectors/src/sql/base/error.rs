use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Low‐level I/O failure, e.g. reading the file being bulk-loaded.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any PostgreSQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] tokio_postgres::Error),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("Postgres connection failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}
