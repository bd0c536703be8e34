//! # Roster Users Crate
//!
//! Account management and authentication for the Roster service:
//! credential hashing, bearer-token issuance and verification, and the
//! account service orchestrating both over the user store.
//!
//! ## Architecture
//!
//! - **Services**: the account service over a narrow store trait
//! - **Utils**: password hashing (bcrypt) and token handling (JWT)
//! - **Types**: outward-facing view types without credential material

pub mod services;
pub mod types;
pub mod utils;

// Re-export database types for convenience
pub use roster_database::{User, UserError, UserPatch, UserRepository, UserResult};

pub use services::{AccountService, MockUserRepository, ProfileSelector, ProfileUpdate, UserStore};
pub use types::UserView;
pub use utils::{TokenIssuer, TOKEN_TTL};
