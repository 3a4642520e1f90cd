use crate::error::JobError;
use engine_config::{
    document::{list_view_documents, load_view_document},
    settings::views::ViewTransformSettings,
};
use model::execution::view::ViewSpec;
use std::path::PathBuf;
use tracing::warn;

/// Where view definitions come from, highest precedence first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSource {
    /// Every `.yml`/`.yaml` document directly inside a directory.
    Directory(PathBuf),
    /// A single document.
    Document(PathBuf),
    /// One view given as plain parameters.
    Inline(ViewSpec),
}

impl ViewSource {
    /// Picks exactly one source. A directory wins over a document, which
    /// wins over inline parameters; lower-precedence settings are ignored.
    pub fn resolve(settings: &ViewTransformSettings) -> Result<Self, JobError> {
        if let Some(dir) = &settings.yml_path {
            return Ok(ViewSource::Directory(dir.clone()));
        }
        if let Some(file) = &settings.yml_file {
            return Ok(ViewSource::Document(file.clone()));
        }

        match (&settings.view_name, &settings.view_as) {
            (Some(name), Some(select)) => {
                let spec = ViewSpec::new(name.as_str(), select.as_str())?
                    .with_transforms(settings.statements.iter().cloned());
                Ok(ViewSource::Inline(spec))
            }
            _ => Err(JobError::MissingConfiguration),
        }
    }

    /// Reads and validates every definition of this source. Nothing is
    /// returned unless all documents parse.
    pub async fn load_specs(&self) -> Result<Vec<ViewSpec>, JobError> {
        match self {
            ViewSource::Directory(dir) => {
                let documents = list_view_documents(dir).await?;
                if documents.is_empty() {
                    warn!("No view documents found in {}", dir.display());
                }

                let mut specs = Vec::with_capacity(documents.len());
                for document in &documents {
                    specs.push(load_view_document(document).await?);
                }
                Ok(specs)
            }
            ViewSource::Document(path) => Ok(vec![load_view_document(path).await?]),
            ViewSource::Inline(spec) => Ok(vec![spec.clone()]),
        }
    }
}
