//! Roster Database Crate
//!
//! This crate provides storage functionality for the Roster account
//! service: MongoDB connection management, the user repository, and the
//! shared error taxonomy.

use anyhow::Result;
use mongodb::Database;
use roster_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use entities::{User, UserPatch};
pub use mongodb::bson::oid::ObjectId;
pub use repos::UserRepository;
pub use types::{is_duplicate_key, UserError, UserResult};

/// Connect to the store and prepare the collections it relies on.
///
/// Fails if the store is unreachable; the caller is expected to abort
/// startup rather than serve without persistence.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<Database> {
    let database = prepare_database(config).await?;

    UserRepository::new(&database).ensure_indexes().await?;

    Ok(database)
}
