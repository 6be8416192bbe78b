//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod ai_provider;
pub mod document_store;
pub mod user_store;
pub mod workflow_logger;
