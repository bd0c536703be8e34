//! User repository for document-store operations.

use crate::entities::{User, UserPatch};
use crate::types::{UserError, UserResult};
use mongodb::bson::{doc, oid::ObjectId, Document, Regex};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Database, IndexModel};
use tracing::debug;

const USERS_COLLECTION: &str = "users";

/// Repository for user records in the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    collection: mongodb::Collection<User>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }

    /// Create the unique email index.
    ///
    /// Registration does a read-before-write existence check, but that
    /// check is racy under concurrent registration; the unique index
    /// makes the store the final arbiter. Violations surface as
    /// [`UserError::EmailAlreadyExists`].
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        debug!(collection = USERS_COLLECTION, "unique email index ensured");
        Ok(())
    }

    /// Find a user by exact email
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    /// Find a user by name, case-insensitively
    pub async fn find_by_name(&self, name: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(name_filter(name)).await?;
        Ok(user)
    }

    /// Insert a new user; the store assigns the identifier.
    pub async fn insert(&self, user: &User) -> UserResult<User> {
        let result = self.collection.insert_one(user).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            UserError::DatabaseError("store returned a non-ObjectId identifier".to_string())
        })?;

        let mut created = user.clone();
        created.id = Some(id);
        Ok(created)
    }

    /// Apply a patch to the user matched by exact email.
    pub async fn update_by_email(&self, email: &str, patch: &UserPatch) -> UserResult<User> {
        self.update_one(doc! { "email": email }, patch).await
    }

    /// Apply a patch to the user matched case-insensitively by name.
    pub async fn update_by_name(&self, name: &str, patch: &UserPatch) -> UserResult<User> {
        self.update_one(name_filter(name), patch).await
    }

    async fn update_one(&self, filter: Document, patch: &UserPatch) -> UserResult<User> {
        if patch.is_empty() {
            // Nothing to change; still confirm the record exists.
            return self
                .collection
                .find_one(filter)
                .await?
                .ok_or(UserError::UserNotFound);
        }

        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set_document(patch) })
            .return_document(ReturnDocument::After)
            .await?;

        updated.ok_or(UserError::UserNotFound)
    }

    /// Remove the user with the given email.
    pub async fn delete_by_email(&self, email: &str) -> UserResult<()> {
        let result = self.collection.delete_one(doc! { "email": email }).await?;

        if result.deleted_count == 0 {
            return Err(UserError::UserNotFound);
        }
        Ok(())
    }

    /// All user records, oldest first.
    pub async fn list(&self) -> UserResult<Vec<User>> {
        use futures_util::stream::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await?;

        let users = cursor.try_collect().await?;
        Ok(users)
    }

    /// Find a user by its store-assigned identifier.
    pub async fn find_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }
}

/// Anchored, case-insensitive exact-match filter on `name`.
///
/// The input is escaped so that names containing regex metacharacters
/// match literally.
fn name_filter(name: &str) -> Document {
    doc! {
        "name": Regex {
            pattern: format!("^{}$", regex::escape(name)),
            options: "i".to_string(),
        }
    }
}

fn set_document(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    if let Some(ref name) = patch.name {
        set.insert("name", name);
    }
    if let Some(ref email) = patch.email {
        set.insert("email", email);
    }
    if let Some(ref password_hash) = patch.password_hash {
        set.insert("password_hash", password_hash);
    }
    set.insert("updated_at", chrono::Utc::now().to_rfc3339());
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn name_filter_is_anchored_and_case_insensitive() {
        let filter = name_filter("Ann");
        let Some(Bson::RegularExpression(regex)) = filter.get("name") else {
            panic!("expected a regex filter");
        };

        assert_eq!(regex.pattern, "^Ann$");
        assert_eq!(regex.options, "i");
    }

    #[test]
    fn name_filter_escapes_metacharacters() {
        let filter = name_filter("a.b*c");
        let Some(Bson::RegularExpression(regex)) = filter.get("name") else {
            panic!("expected a regex filter");
        };

        assert_eq!(regex.pattern, r"^a\.b\*c$");
    }

    #[test]
    fn set_document_only_includes_patched_fields() {
        let patch = UserPatch {
            name: Some("Ann".to_string()),
            email: None,
            password_hash: None,
        };

        let set = set_document(&patch);
        assert_eq!(set.get_str("name").unwrap(), "Ann");
        assert!(!set.contains_key("email"));
        assert!(!set.contains_key("password_hash"));
        assert!(set.contains_key("updated_at"));
    }
}
