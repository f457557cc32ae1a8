//! In-memory Attachment Intake for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{
    generate_object_name, AttachmentLocator, AttachmentStore, AttachmentStoreError,
};

/// In-memory attachment store with optional failure injection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_next: Arc<Mutex<Option<String>>>,
}

impl InMemoryAttachmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `store` call fail with the given message.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some(message.into());
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AttachmentStore for InMemoryAttachmentStore {
    async fn store(
        &self,
        content: &[u8],
        original_name: &str,
        _content_type: &str,
    ) -> Result<AttachmentLocator, AttachmentStoreError> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(AttachmentStoreError::backend(message));
        }
        if content.is_empty() {
            return Err(AttachmentStoreError::Empty);
        }

        let object_name = generate_object_name(original_name);
        let locator = format!("mem://attachments/{object_name}");
        self.objects
            .lock()
            .unwrap()
            .insert(object_name, content.to_vec());
        Ok(AttachmentLocator::new(locator))
    }
}
