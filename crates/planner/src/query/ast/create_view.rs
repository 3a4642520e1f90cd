//! Defines the AST for `CREATE VIEW` statements.

#[derive(Debug, Clone)]
pub struct CreateView {
    /// View name as written in the configuration. Not quoted on render, so
    /// a schema prefix like `reporting.v_budget` is passed through.
    pub name: String,
    /// The SELECT the view is defined as.
    pub query: String,
    /// Leave an existing relation of the same name untouched.
    pub if_absent: bool,
}
