use crate::sql::base::error::ConnectorError;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, Config, NoTls, config::SslMode};
use tracing::{error, warn};

/// Parses a connection URL, optionally pointing it at another database.
pub fn parse_config(url: &str, database: Option<&str>) -> Result<Config, ConnectorError> {
    let mut config = url
        .parse::<Config>()
        .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;

    if let Some(database) = database {
        config.dbname(database);
    }

    Ok(config)
}

pub async fn connect_client(config: Config) -> Result<Client, ConnectorError> {
    match config.get_ssl_mode() {
        SslMode::Disable => connect_without_tls(config).await,
        SslMode::Require => connect_with_tls(config).await,
        SslMode::Prefer => match connect_with_tls(config.clone()).await {
            Ok(client) => Ok(client),
            Err(error) => {
                warn!(%error, "Postgres TLS handshake failed, retrying without TLS");
                connect_without_tls(config).await
            }
        },
        _ => connect_with_tls(config).await,
    }
}

pub(crate) async fn connect_with_tls(config: Config) -> Result<Client, ConnectorError> {
    let connector = TlsConnector::builder().build()?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

pub(crate) async fn connect_without_tls(config: Config) -> Result<Client, ConnectorError> {
    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_overrides_database() {
        let config = parse_config("postgres://user:pw@localhost:5432/postgres", Some("etl")).unwrap();
        assert_eq!(config.get_dbname(), Some("etl"));
        assert_eq!(config.get_user(), Some("user"));
    }

    #[test]
    fn test_parse_config_keeps_database_without_override() {
        let config = parse_config("postgres://user@localhost/analytics", None).unwrap();
        assert_eq!(config.get_dbname(), Some("analytics"));
    }

    #[test]
    fn test_parse_config_rejects_garbage() {
        assert!(matches!(
            parse_config("postgres://user@localhost:notaport/db", None),
            Err(ConnectorError::InvalidUrl(_))
        ));
    }
}
