use crate::query::ast::create_view::CreateView;

#[derive(Debug, Clone)]
pub struct CreateViewBuilder {
    ast: CreateView,
}

impl CreateViewBuilder {
    pub fn new(name: &str, query: &str) -> Self {
        Self {
            ast: CreateView {
                name: name.trim().to_string(),
                query: query.trim().trim_end_matches(';').trim_end().to_string(),
                if_absent: false,
            },
        }
    }

    pub fn if_absent(mut self) -> Self {
        self.ast.if_absent = true;
        self
    }

    pub fn build(self) -> CreateView {
        self.ast
    }
}
