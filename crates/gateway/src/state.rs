//! Shared application state for the gateway

use crate::error::{GatewayError, GatewayResult};
use mongodb::Database;
use roster_users::{AccountService, TokenIssuer, UserRepository};
use std::sync::Arc;

/// Shared application state containing the account service.
#[derive(Clone)]
pub struct GatewayState {
    account_service: Arc<AccountService<UserRepository>>,
}

impl GatewayState {
    /// Build the state from a connected database and the signing secret.
    ///
    /// Fails if the secret is empty, so a misconfigured process never
    /// reaches the point of serving requests.
    pub fn new(database: &Database, token_secret: &str) -> GatewayResult<Self> {
        let tokens = TokenIssuer::new(token_secret)
            .map_err(|e| GatewayError::InternalError(e.to_string()))?;
        let repository = UserRepository::new(database);

        Ok(Self {
            account_service: Arc::new(AccountService::new(repository, tokens)),
        })
    }

    /// Get an account service reference
    pub fn account_service(&self) -> &AccountService<UserRepository> {
        &self.account_service
    }
}
