use crate::execution::errors::JobSpecError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, sync::Arc};

/// Opaque identifier of a sheet owned by the hosting service.
///
/// Smartsheet hands out numeric ids, but nothing here relies on that. The id
/// is formatted into file names and request URLs, so [`SheetId::validate`]
/// must pass before it is used for either.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SheetId(Arc<str>);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fails when the id is blank or could leave the output directory or
    /// change the request path.
    pub fn validate(&self) -> Result<(), JobSpecError> {
        if self.0.trim().is_empty() {
            return Err(JobSpecError::ConfigurationMissing(
                "sheet id is empty".to_string(),
            ));
        }
        check_path_safe(&self.0)
    }
}

fn check_path_safe(id: &str) -> Result<(), JobSpecError> {
    let unsafe_char = |c: char| matches!(c, '/' | '\\' | '?' | '#') || c.is_control();
    if id.contains("..") || id.contains(unsafe_char) {
        return Err(JobSpecError::InvalidSheetId(id.to_string()));
    }
    Ok(())
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SheetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SheetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for SheetId {
    fn from(id: u64) -> Self {
        Self::new(id.to_string())
    }
}

// Job files written by hand carry the id either as a bare number or quoted.
impl<'de> Deserialize<'de> for SheetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(SheetId::from(n)),
            Raw::Text(s) => {
                check_path_safe(&s).map_err(de::Error::custom)?;
                Ok(SheetId::from(s))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Arc<str>);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RunId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
