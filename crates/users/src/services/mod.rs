//! Business logic for account management.

pub mod account_service;
pub mod mock_repositories;

pub use account_service::{AccountService, ProfileSelector, ProfileUpdate, UserStore};
pub use mock_repositories::MockUserRepository;
