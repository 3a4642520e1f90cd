//! Defines the AST for `COPY … FROM STDIN` bulk loads.

use crate::query::ast::common::TableRef;

#[derive(Debug, Clone)]
pub struct Copy {
    pub table: TableRef,
    pub options: Vec<CopyOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOption {
    pub key: String,
    pub value: Option<String>,
}
