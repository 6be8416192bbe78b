//! Result rendering and transport status mapping

pub mod console;
pub mod formatter;
pub mod json;
pub mod status;
