use crate::error::JobError;
use engine_config::{defaults::ACCESS_TOKEN_KEY, env::ConfigStore};
use std::sync::Arc;

/// Picks the access token for a sheet session: an explicit value wins,
/// otherwise the configured default is read from the store.
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn ConfigStore>,
    key: String,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            key: ACCESS_TOKEN_KEY.to_string(),
        }
    }

    pub fn resolve(&self, explicit: Option<&str>) -> Result<String, JobError> {
        if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
            return Ok(token.to_string());
        }

        self.store.get_non_empty(&self.key).ok_or_else(|| {
            JobError::ConfigurationMissing(format!(
                "no access token supplied and {} is not set",
                self.key
            ))
        })
    }
}
