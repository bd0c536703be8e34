//! Repository implementations over the document store.

pub mod user_repository;

pub use user_repository::UserRepository;
