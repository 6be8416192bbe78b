//! Documents owned by users and references passed to the AI provider.
//!
//! - [`entities::Document`]: a stored text document scoped by owner email
//! - [`reference::DocumentRef`]: a URL or opaque identifier grounding an answer

pub mod entities;
pub mod reference;
