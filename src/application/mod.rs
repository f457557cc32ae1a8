//! Application services coordinating domain logic with the ports.

pub mod orchestrator;
pub mod recommendations;

pub use orchestrator::{ConversationSnapshot, SessionOrchestrator};
pub use recommendations::{BrowseOutcome, ProductBrowseService};
