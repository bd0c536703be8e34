//! Shared types for the account service.

pub mod responses;

pub use responses::UserView;
