use crate::execution::errors::JobSpecError;
use serde::{Deserialize, Serialize};

/// A database view definition and the statements to run once it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub view_name: String,
    pub view_as: String,
    #[serde(default)]
    pub transforms: Vec<String>,
}

impl ViewSpec {
    pub fn new(
        view_name: impl Into<String>,
        view_as: impl Into<String>,
    ) -> Result<Self, JobSpecError> {
        let view_name = view_name.into();
        let view_as = view_as.into();

        if view_name.trim().is_empty() {
            return Err(JobSpecError::ConfigurationMissing(
                "view_name must not be empty".to_string(),
            ));
        }
        if view_as.trim().is_empty() {
            return Err(JobSpecError::ConfigurationMissing(format!(
                "view {view_name} has an empty select statement"
            )));
        }

        Ok(Self {
            view_name,
            view_as,
            transforms: Vec::new(),
        })
    }

    pub fn with_transforms<I, S>(mut self, transforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transforms = transforms.into_iter().map(Into::into).collect();
        self
    }

    /// Transforms joined into one batch, or `None` when there is nothing to run.
    pub fn transform_batch(&self) -> Option<String> {
        let statements: Vec<&str> = self
            .transforms
            .iter()
            .map(|s| s.trim().trim_end_matches(';').trim())
            .filter(|s| !s.is_empty())
            .collect();

        if statements.is_empty() {
            None
        } else {
            Some(statements.join(";"))
        }
    }
}
