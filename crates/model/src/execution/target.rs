use crate::execution::errors::JobSpecError;
use serde::{Deserialize, Serialize};

/// The table a sheet is synchronised into. Lives for one job only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSyncTarget {
    /// Named connection, resolved to a URL through the config store.
    pub connection_ref: String,
    pub database: String,
    pub schema: String,
    pub table_name: String,
}

impl TableSyncTarget {
    pub fn new(
        connection_ref: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Result<Self, JobSpecError> {
        let target = Self {
            connection_ref: connection_ref.into(),
            database: database.into(),
            schema: schema.into(),
            table_name: table_name.into(),
        };

        for (field, value) in [
            ("connection_ref", &target.connection_ref),
            ("database", &target.database),
            ("schema", &target.schema),
            ("table_name", &target.table_name),
        ] {
            if value.trim().is_empty() {
                return Err(JobSpecError::ConfigurationMissing(format!(
                    "{field} must not be empty"
                )));
            }
        }

        Ok(target)
    }

    /// `schema.table`, as used in log lines and error messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.table_name)
    }
}
