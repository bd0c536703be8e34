//! Shared types for the database layer.

pub mod errors;

pub use errors::{is_duplicate_key, UserError, UserResult};
