//! Names and fallback values shared by job settings and the runtime.

/// Config key holding the default sheet-service access token.
pub const ACCESS_TOKEN_KEY: &str = "SMARTSHEET_ACCESS_TOKEN";

/// Config key overriding the sheet-service API base URL.
pub const API_BASE_KEY: &str = "SMARTSHEET_API_BASE";

pub const DEFAULT_PG_CONN: &str = "etl_postgres";
pub const DEFAULT_PG_DB: &str = "etl";
pub const DEFAULT_PG_SCHEMA: &str = "public";

/// Column label prepended to enriched exports.
pub const ROW_NUMBER_COLUMN: &str = "RowNumber";

const CONNECTION_KEY_PREFIX: &str = "SHEETSYNC_CONN_";

/// Config key holding the URL of a named database connection:
/// `etl_postgres` is looked up as `SHEETSYNC_CONN_ETL_POSTGRES`.
pub fn connection_key(connection_ref: &str) -> String {
    let normalized: String = connection_ref
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{CONNECTION_KEY_PREFIX}{normalized}")
}
