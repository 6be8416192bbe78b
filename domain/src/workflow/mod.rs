//! Workflow requests and their tagged results.
//!
//! Every facade operation answers with a [`result::WorkflowResult`]: either a
//! success payload or an error payload, never both. Error payloads carry an
//! [`result::ErrorKind`] so the transport can pick a status code without
//! parsing messages.

pub mod request;
pub mod result;
