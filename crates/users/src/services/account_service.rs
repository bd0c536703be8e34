//! Account service orchestrating registration, login, and profile
//! management over a user store.

use crate::types::UserView;
use crate::utils::{hash_password, verify_password, TokenIssuer};
use roster_database::{User, UserError, UserPatch, UserRepository, UserResult};
use tracing::{info, warn};

/// Which stored record a profile update targets.
#[derive(Debug, Clone, Copy)]
pub enum ProfileSelector<'a> {
    /// Exact email match.
    Email(&'a str),
    /// Case-insensitive exact name match.
    Name(&'a str),
}

/// Requested profile changes; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Plaintext replacement password; hashed before it reaches the store.
    pub password: Option<String>,
}

/// Service for account operations
pub struct AccountService<R> {
    store: R,
    tokens: TokenIssuer,
}

impl AccountService<UserRepository> {
    /// Create an account service backed by the document store.
    pub fn new(store: UserRepository, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }
}

impl<R> AccountService<R>
where
    R: UserStore,
{
    /// Create an account service over any store implementation (for testing).
    pub fn with_store(store: R, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    /// Register a new account.
    ///
    /// The existence check gives duplicate registrations a clean error;
    /// the store's unique email index catches the concurrent case the
    /// check cannot.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> UserResult<UserView> {
        if name.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
            return Err(UserError::MissingFields);
        }

        if self.store.find_by_email(email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .store
            .insert(&User::new(name.to_string(), email.to_string(), password_hash))
            .await?;

        info!(email = %user.email, "user registered");
        Ok(user.into())
    }

    /// Authenticate with email and password, issuing a bearer token.
    ///
    /// Unknown email and wrong password return the same error so the
    /// response does not reveal whether an account exists.
    pub async fn login(&self, email: &str, password: &str) -> UserResult<(UserView, String)> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(UserError::MissingFields);
        }

        let Some(user) = self.store.find_by_email(email).await? else {
            warn!(email, "login attempt for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            warn!(email, "login attempt with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let user_id = user
            .id
            .ok_or_else(|| UserError::DatabaseError("stored user has no identifier".to_string()))?
            .to_hex();
        let token = self.tokens.issue(&user_id)?;

        info!(email = %user.email, "user logged in");
        Ok((user.into(), token))
    }

    /// Validate a bearer token and return the user identifier it carries.
    pub fn verify_token(&self, token: &str) -> UserResult<String> {
        self.tokens.verify(token)
    }

    /// Update the profile selected by email or name.
    pub async fn update_profile(
        &self,
        selector: ProfileSelector<'_>,
        update: ProfileUpdate,
    ) -> UserResult<UserView> {
        let patch = UserPatch {
            name: update.name,
            email: update.email,
            password_hash: update.password.as_deref().map(hash_password).transpose()?,
        };

        let user = match selector {
            ProfileSelector::Email(email) => self.store.update_by_email(email, &patch).await?,
            ProfileSelector::Name(name) => self.store.update_by_name(name, &patch).await?,
        };

        info!(email = %user.email, "user profile updated");
        Ok(user.into())
    }

    /// All accounts, hashes excluded. An empty store is an empty list.
    pub async fn list_users(&self) -> UserResult<Vec<UserView>> {
        let users = self.store.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    /// Look up an account by name, case-insensitively.
    pub async fn get_user_by_name(&self, name: &str) -> UserResult<UserView> {
        self.store
            .find_by_name(name)
            .await?
            .map(UserView::from)
            .ok_or(UserError::UserNotFound)
    }

    /// Delete the account with the given email.
    pub async fn delete_user_by_email(&self, email: &str) -> UserResult<()> {
        self.store.delete_by_email(email).await?;
        info!(email, "user deleted");
        Ok(())
    }
}

/// Narrow read/write contract the account service has with the store.
pub trait UserStore {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>>;
    async fn insert(&self, user: &User) -> UserResult<User>;
    async fn update_by_email(&self, email: &str, patch: &UserPatch) -> UserResult<User>;
    async fn update_by_name(&self, name: &str, patch: &UserPatch) -> UserResult<User>;
    async fn delete_by_email(&self, email: &str) -> UserResult<()>;
    async fn list(&self) -> UserResult<Vec<User>>;
}

impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.find_by_email(email).await
    }

    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        self.find_by_name(name).await
    }

    async fn insert(&self, user: &User) -> UserResult<User> {
        self.insert(user).await
    }

    async fn update_by_email(&self, email: &str, patch: &UserPatch) -> UserResult<User> {
        self.update_by_email(email, patch).await
    }

    async fn update_by_name(&self, name: &str, patch: &UserPatch) -> UserResult<User> {
        self.update_by_name(name, patch).await
    }

    async fn delete_by_email(&self, email: &str) -> UserResult<()> {
        self.delete_by_email(email).await
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        self.list().await
    }
}
