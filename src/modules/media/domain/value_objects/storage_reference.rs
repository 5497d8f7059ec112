use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::{AppError, AppResult};

/// Relative path of a stored file, e.g. `anime/content/<digest>.png`.
///
/// Always relative, `/`-separated and free of `.`/`..` segments, so it can
/// be joined under a storage root without escaping it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageReference(String);

impl StorageReference {
    pub fn new(path: impl Into<String>) -> AppResult<Self> {
        let path = path.into().replace('\\', "/");
        let trimmed = path.trim();

        if trimmed.is_empty() {
            return Err(AppError::InvalidArgument(
                "Storage reference cannot be empty".to_string(),
            ));
        }
        if trimmed.starts_with('/') || trimmed.contains(':') {
            return Err(AppError::InvalidArgument(format!(
                "Storage reference '{}' must be relative",
                trimmed
            )));
        }
        if trimmed
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(AppError::InvalidArgument(format!(
                "Storage reference '{}' contains an invalid path segment",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Join a directory and a file name into a reference
    pub fn in_directory(directory: &str, file_name: &str) -> AppResult<Self> {
        Self::new(format!("{}/{}", directory.trim_end_matches('/'), file_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StorageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StorageReference {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StorageReference> for String {
    fn from(value: StorageReference) -> Self {
        value.0
    }
}
