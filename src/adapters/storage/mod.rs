//! Attachment Intake adapters.

mod in_memory;
mod local_store;

pub use in_memory::InMemoryAttachmentStore;
pub use local_store::LocalAttachmentStore;
