//! Attachment Intake port - persists uploaded binaries to content storage.
//!
//! Implementations must generate a collision-resistant object name: a
//! random identifier composed with a sanitized version of the original
//! filename, then return a stable locator for the stored content.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::DomainError;

/// A stable reference string identifying stored attachment content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentLocator(String);

impl AttachmentLocator {
    /// Wraps a locator produced by a storage backend.
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Returns the locator string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttachmentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port for storing attachment binaries.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persists `content` under a freshly generated name and returns its
    /// locator.
    async fn store(
        &self,
        content: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<AttachmentLocator, AttachmentStoreError>;
}

/// Strips characters outside `[A-Za-z0-9.-]` from an original filename.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        .collect()
}

/// Composes a collision-resistant object name from a random identifier and
/// the sanitized original filename.
pub fn generate_object_name(original_name: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name))
}

/// Attachment storage errors.
#[derive(Debug, Clone, Error)]
pub enum AttachmentStoreError {
    /// No content was supplied.
    #[error("attachment is empty")]
    Empty,

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Backend(String),
}

impl AttachmentStoreError {
    /// Creates a backend failure error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

impl From<AttachmentStoreError> for DomainError {
    fn from(err: AttachmentStoreError) -> Self {
        DomainError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_unsafe_characters() {
        assert_eq!(
            sanitize_filename("my photo (1) #final!.jpg"),
            "myphoto1final.jpg"
        );
        assert_eq!(sanitize_filename("weird/../path.png"), "weird..path.png");
        assert_eq!(sanitize_filename("clean-name.webp"), "clean-name.webp");
    }

    #[test]
    fn sanitize_can_yield_empty_string() {
        assert_eq!(sanitize_filename("äöü §§"), "");
    }

    #[test]
    fn generated_names_are_collision_resistant() {
        let a = generate_object_name("photo.jpg");
        let b = generate_object_name("photo.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("-photo.jpg"));
    }
}
