//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// Renders an identifier (like a table or schema name) for the dialect.
    ///
    /// Names written as plain identifiers resolve the way the server folds
    /// them unquoted; anything else is quoted verbatim with embedded quotes
    /// escaped.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Wraps `statement` so it only runs when no relation called `relation`
    /// exists yet.
    fn guard_if_absent(&self, relation: &str, statement: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

const GUARD_TAG: &str = "$sync_guard$";
const BODY_TAG: &str = "$sync_body$";

impl Dialect for Postgres {
    // Unquoted names fold to lower case in PostgreSQL, so `NewTable` means
    // `newtable`. Folding here and quoting keeps reserved words usable.
    fn quote_identifier(&self, ident: &str) -> String {
        if is_plain_identifier(ident) {
            format!(r#""{}""#, ident.to_ascii_lowercase())
        } else {
            format!(r#""{}""#, ident.replace('"', r#""""#))
        }
    }

    // PostgreSQL has no `CREATE VIEW IF NOT EXISTS`; an anonymous block
    // checks the catalog and runs the statement dynamically instead.
    fn guard_if_absent(&self, relation: &str, statement: &str) -> String {
        let literal = relation.replace('\'', "''");
        format!(
            "DO {GUARD_TAG} BEGIN IF to_regclass('{literal}') IS NULL THEN EXECUTE {BODY_TAG}{statement}{BODY_TAG}; END IF; END {GUARD_TAG};"
        )
    }
}

fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
