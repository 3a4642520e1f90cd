use crate::query::ast::{
    common::TableRef,
    copy::{Copy, CopyOption},
};

#[derive(Debug, Clone)]
pub struct CopyBuilder {
    ast: Copy,
}

impl CopyBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Copy {
                table,
                options: Vec::new(),
            },
        }
    }

    pub fn option(mut self, key: &str, value: Option<&str>) -> Self {
        self.ast.options.push(CopyOption {
            key: key.to_string(),
            value: value.map(|v| v.to_string()),
        });
        self
    }

    /// `FORMAT csv, HEADER true`: the first line of the input is skipped.
    pub fn csv_with_header(self) -> Self {
        self.option("FORMAT", Some("csv")).option("HEADER", Some("true"))
    }

    pub fn build(self) -> Copy {
        self.ast
    }
}
