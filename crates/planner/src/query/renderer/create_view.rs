use crate::query::{
    ast::create_view::CreateView,
    renderer::{Render, Renderer},
};

impl Render for CreateView {
    fn render(&self, r: &mut Renderer) {
        let statement = format!("CREATE VIEW {} AS ({})", self.name, self.query);

        if self.if_absent {
            let guarded = r.dialect.guard_if_absent(&self.name, &statement);
            r.sql.push_str(&guarded);
        } else {
            r.sql.push_str(&statement);
            r.sql.push(';');
        }
    }
}
