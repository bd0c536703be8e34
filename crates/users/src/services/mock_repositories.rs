//! Mock repository implementations for testing core service functionality

use crate::services::account_service::UserStore;
use roster_database::{ObjectId, User, UserError, UserPatch, UserResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory user store for tests.
///
/// Mirrors the document store's behavior, including the unique email
/// constraint enforced on insert.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn insert(&self, user: &User) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Unique email index equivalent.
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists);
        }

        let id = ObjectId::new();
        let mut created = user.clone();
        created.id = Some(id);
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn update_by_email(&self, email: &str, patch: &UserPatch) -> UserResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.email == email)
            .ok_or(UserError::UserNotFound)?;

        apply_patch(user, patch);
        Ok(user.clone())
    }

    async fn update_by_name(&self, name: &str, patch: &UserPatch) -> UserResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .ok_or(UserError::UserNotFound)?;

        apply_patch(user, patch);
        Ok(user.clone())
    }

    async fn delete_by_email(&self, email: &str) -> UserResult<()> {
        let mut users = self.users.write().await;
        let id = users
            .iter()
            .find(|(_, u)| u.email == email)
            .map(|(id, _)| *id)
            .ok_or(UserError::UserNotFound)?;

        users.remove(&id);
        Ok(())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }
}

fn apply_patch(user: &mut User, patch: &UserPatch) {
    if let Some(ref name) = patch.name {
        user.name = name.clone();
    }
    if let Some(ref email) = patch.email {
        user.email = email.clone();
    }
    if let Some(ref password_hash) = patch.password_hash {
        user.password_hash = password_hash.clone();
    }
    user.updated_at = chrono::Utc::now().to_rfc3339();
}
