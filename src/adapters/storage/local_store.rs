//! Local filesystem Attachment Intake adapter.
//!
//! Writes attachment binaries under a base directory using a
//! write-to-temp-then-rename pattern so a crash mid-write never leaves a
//! partial object, and returns locators of the form
//! `{locator_prefix}/{generated_name}`.

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::StorageConfig;
use crate::ports::{
    generate_object_name, AttachmentLocator, AttachmentStore, AttachmentStoreError,
};

/// Maximum attachment size allowed (10 MB).
const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Local filesystem storage for complaint attachments.
#[derive(Debug, Clone)]
pub struct LocalAttachmentStore {
    config: StorageConfig,
}

impl LocalAttachmentStore {
    /// Creates a store from storage configuration.
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn locator_for(&self, object_name: &str) -> AttachmentLocator {
        AttachmentLocator::new(format!(
            "{}/{}",
            self.config.locator_prefix.trim_end_matches('/'),
            object_name
        ))
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn store(
        &self,
        content: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<AttachmentLocator, AttachmentStoreError> {
        if content.is_empty() {
            return Err(AttachmentStoreError::Empty);
        }
        if content.len() > MAX_ATTACHMENT_BYTES {
            return Err(AttachmentStoreError::backend(format!(
                "attachment of {} bytes exceeds the {} byte limit",
                content.len(),
                MAX_ATTACHMENT_BYTES
            )));
        }

        fs::create_dir_all(&self.config.base_dir).await.map_err(|e| {
            AttachmentStoreError::backend(format!(
                "Failed to create storage directory {}: {e}",
                self.config.base_dir.display()
            ))
        })?;

        let object_name = generate_object_name(original_name);
        let final_path = self.config.base_dir.join(&object_name);
        let temp_path = self.config.base_dir.join(format!("{object_name}.tmp"));

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            AttachmentStoreError::backend(format!(
                "Failed to create temp file {}: {e}",
                temp_path.display()
            ))
        })?;

        file.write_all(content).await.map_err(|e| {
            AttachmentStoreError::backend(format!(
                "Failed to write attachment {}: {e}",
                temp_path.display()
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            AttachmentStoreError::backend(format!(
                "Failed to sync attachment {}: {e}",
                temp_path.display()
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            AttachmentStoreError::backend(format!(
                "Failed to rename {} to {}: {e}",
                temp_path.display(),
                final_path.display()
            ))
        })?;

        debug!(
            object = %object_name,
            content_type,
            bytes = content.len(),
            "attachment stored"
        );
        Ok(self.locator_for(&object_name))
    }
}
