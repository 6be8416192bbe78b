//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to pose to the AI provider
//! - [`error::DomainError`]: domain-level validation errors

pub mod error;
pub mod question;
pub mod string;
