//! Shopfront - retail storefront backend.
//!
//! Serves catalog browsing with personalized recommendations, order
//! history, customer login, and a conversational support panel that routes
//! each conversation to a specialized remote agent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
