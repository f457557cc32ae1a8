//! Attachment storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Attachment storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory attachments are written to.
    pub base_dir: PathBuf,

    /// Prefix composed with the generated object name to form the locator
    /// handed to the complaint agent (e.g. `s3://complaint-kb`).
    #[serde(default = "default_locator_prefix")]
    pub locator_prefix: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidStorageDir);
        }
        if self.locator_prefix.trim().is_empty() {
            return Err(ValidationError::InvalidLocatorPrefix);
        }
        Ok(())
    }
}

fn default_locator_prefix() -> String {
    "s3://complaint-kb".to_string()
}
