//! Domain layer: pure business types and state machines.

pub mod catalog;
pub mod chat;
pub mod foundation;
