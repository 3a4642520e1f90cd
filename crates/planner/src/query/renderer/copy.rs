use crate::query::ast::copy::Copy;
use crate::query::renderer::Render;

impl Render for Copy {
    fn render(&self, r: &mut super::Renderer) {
        r.sql.push_str("COPY ");
        r.render_table_ref(&self.table);
        r.sql.push_str(" FROM STDIN");

        if !self.options.is_empty() {
            r.sql.push_str(" WITH (");
            for (i, option) in self.options.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.sql.push_str(&option.key);
                if let Some(value) = &option.value {
                    r.sql.push(' ');
                    r.sql.push_str(value);
                }
            }
            r.sql.push(')');
        }

        r.sql.push(';');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::common::TableRef, builder::copy::CopyBuilder,
        dialect::Postgres,
        renderer::render_with,
    };

    #[test]
    fn test_render_copy_csv_from_stdin() {
        let copy = CopyBuilder::new(TableRef::new(Some("public"), "newtable"))
            .csv_with_header()
            .build();

        assert_eq!(
            render_with(&copy, &Postgres),
            r#"COPY "public"."newtable" FROM STDIN WITH (FORMAT csv, HEADER true);"#
        );
    }

    #[test]
    fn test_render_copy_folds_mixed_case_table() {
        let copy = CopyBuilder::new(TableRef::new(Some("Finance"), "NewTable"))
            .option("FORMAT", Some("csv"))
            .option("FREEZE", None)
            .build();

        assert_eq!(
            render_with(&copy, &Postgres),
            r#"COPY "finance"."newtable" FROM STDIN WITH (FORMAT csv, FREEZE);"#
        );
    }
}
