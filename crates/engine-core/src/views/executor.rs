use crate::{error::JobError, views::source::ViewSource};
use connectors::sql::base::adapter::SqlSink;
use model::execution::view::ViewSpec;
use planner::query::{
    builder::create_view::CreateViewBuilder, dialect::Postgres, renderer::render_with,
};
use tracing::{debug, info};

/// Ensures views exist and runs their transforms, one view at a time in
/// source order. The first failure stops the run; views handled before it
/// stay applied.
pub struct ViewExecutor<'a> {
    sink: &'a dyn SqlSink,
}

impl<'a> ViewExecutor<'a> {
    pub fn new(sink: &'a dyn SqlSink) -> Self {
        Self { sink }
    }

    /// Loads every definition of `source`, then applies them. Returns the
    /// number of views handled.
    pub async fn run(&self, source: &ViewSource) -> Result<usize, JobError> {
        let specs = source.load_specs().await?;
        self.apply_all(&specs).await
    }

    pub async fn apply_all(&self, specs: &[ViewSpec]) -> Result<usize, JobError> {
        for spec in specs {
            self.apply(spec).await?;
        }

        info!("Applied {} view definitions", specs.len());
        Ok(specs.len())
    }

    async fn apply(&self, spec: &ViewSpec) -> Result<(), JobError> {
        let view_failed = |source| JobError::ViewFailed {
            view: spec.view_name.clone(),
            source,
        };

        let create = CreateViewBuilder::new(&spec.view_name, &spec.view_as)
            .if_absent()
            .build();
        self.sink
            .exec(&render_with(&create, &Postgres))
            .await
            .map_err(view_failed)?;
        debug!("Ensured view {}", spec.view_name);

        if let Some(batch) = spec.transform_batch() {
            self.sink.exec(&batch).await.map_err(view_failed)?;
            debug!(
                "Ran {} transforms for view {}",
                spec.transforms.len(),
                spec.view_name
            );
        }
        Ok(())
    }
}
