//! Use cases
//!
//! Application-level operations that orchestrate the ports.

pub mod documents;
pub mod workflow_facade;
