//! Persistence/auth backends implementing the `UserStore` and `DocumentStore` ports.

pub mod memory;
pub mod supabase;

pub use memory::InMemoryBackend;
pub use supabase::{SupabaseBackend, SupabaseSetupError};
