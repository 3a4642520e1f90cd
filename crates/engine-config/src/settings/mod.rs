//! Job settings as supplied by the orchestrator, one struct per job kind.
//!
//! Field names and defaults follow the operator parameters jobs were
//! historically configured with (`sheet_type`, `with_json`, `no_overwrite`,
//! `postgres_conn_id`, ...).

use crate::error::ConfigError;
use serde::de::DeserializeOwned;

pub mod sheet;
pub mod views;

/// Parses settings from YAML (JSON documents are accepted too).
pub fn from_yaml_str<T: DeserializeOwned>(text: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(text).map_err(|e| ConfigError::Settings(e.to_string()))
}

pub(crate) fn default_connection() -> String {
    crate::defaults::DEFAULT_PG_CONN.to_string()
}

pub(crate) fn default_database() -> String {
    crate::defaults::DEFAULT_PG_DB.to_string()
}

pub(crate) fn default_schema() -> String {
    crate::defaults::DEFAULT_PG_SCHEMA.to_string()
}
