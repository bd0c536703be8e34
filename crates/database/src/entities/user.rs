//! User entity definitions

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User record as stored in the `users` collection.
///
/// The `password_hash` never leaves this crate in a response shape;
/// callers convert to a view type before serializing outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier; `None` until inserted.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// A record ready for insertion; the store assigns `_id`.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            name,
            email,
            password_hash,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Fields that a profile update may change.
///
/// `password_hash` is the already-hashed replacement; hashing happens in
/// the service layer before this struct is built. Unset fields are left
/// untouched in the stored record.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}
