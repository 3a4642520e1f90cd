//! View configuration documents.
//!
//! A document is a YAML mapping:
//!
//! ```yaml
//! view_name: v_budget
//! as: SELECT * FROM public.budget
//! statements:
//!   - UPDATE public.budget SET amount = 0 WHERE amount IS NULL
//! ```

use crate::error::ConfigError;
use model::execution::view::ViewSpec;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions a file needs to be picked up from a document directory.
pub const DOCUMENT_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

#[derive(Debug, Deserialize)]
struct ViewDocument {
    view_name: String,
    #[serde(rename = "as")]
    view_as: String,
    #[serde(default)]
    statements: Vec<String>,
}

pub fn parse_view_document(text: &str, origin: &Path) -> Result<ViewSpec, ConfigError> {
    let doc: ViewDocument = serde_yaml::from_str(text).map_err(|source| ConfigError::Yaml {
        path: origin.to_path_buf(),
        source,
    })?;

    let spec = ViewSpec::new(doc.view_name, doc.view_as)?.with_transforms(doc.statements);
    Ok(spec)
}

pub async fn load_view_document(path: &Path) -> Result<ViewSpec, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let spec = parse_view_document(&text, path)?;
    debug!(
        "Loaded view {} with {} statements from {}",
        spec.view_name,
        spec.transforms.len(),
        path.display()
    );
    Ok(spec)
}

/// Lists the documents directly inside `dir`, sorted by file name.
/// Subdirectories are not descended into.
pub async fn list_view_documents(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut documents = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        let is_document = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });

        if is_document && entry.file_type().await.map_err(io_err)?.is_file() {
            documents.push(path);
        }
    }

    documents.sort();
    Ok(documents)
}
