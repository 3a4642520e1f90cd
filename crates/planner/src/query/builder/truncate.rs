use crate::query::ast::{common::TableRef, truncate::Truncate};

#[derive(Debug, Clone)]
pub struct TruncateBuilder {
    ast: Truncate,
}

impl TruncateBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Truncate { table },
        }
    }

    pub fn build(self) -> Truncate {
        self.ast
    }
}
