//! Entity definitions for stored records.

pub mod user;

pub use user::{User, UserPatch};
