use crate::settings::{default_connection, default_database};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ensure views and apply transforms. One of three parameter sets selects
/// what to run, highest precedence first: `yml_path` (a directory of
/// documents), `yml_file` (one document), or `view_name` + `view_as`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewTransformSettings {
    #[serde(default)]
    pub view_name: Option<String>,
    #[serde(default)]
    pub view_as: Option<String>,
    /// Transforms for the inline view; documents carry their own.
    #[serde(default)]
    pub statements: Vec<String>,
    #[serde(default)]
    pub yml_file: Option<PathBuf>,
    #[serde(default)]
    pub yml_path: Option<PathBuf>,
    #[serde(default = "default_connection")]
    pub postgres_conn_id: String,
    #[serde(default = "default_database")]
    pub postgres_database: String,
}

impl Default for ViewTransformSettings {
    fn default() -> Self {
        Self {
            view_name: None,
            view_as: None,
            statements: Vec::new(),
            yml_file: None,
            yml_path: None,
            postgres_conn_id: default_connection(),
            postgres_database: default_database(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::from_yaml_str;

    #[test]
    fn test_view_settings_defaults() {
        let settings: ViewTransformSettings = from_yaml_str("yml_path: /etc/views\n").unwrap();
        assert_eq!(settings.yml_path, Some(PathBuf::from("/etc/views")));
        assert!(settings.view_name.is_none());
        assert_eq!(settings.postgres_conn_id, "etl_postgres");
        assert_eq!(settings.postgres_database, "etl");
    }
}
