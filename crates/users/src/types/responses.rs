//! Outward-facing view types.

use roster_database::User;
use serde::{Deserialize, Serialize};

/// User view returned by every account operation.
///
/// The stored password hash is deliberately absent; this is the only
/// shape that leaves the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_database::ObjectId;

    #[test]
    fn view_excludes_password_hash() {
        let mut user = User::new(
            "Ann".to_string(),
            "ann@x.com".to_string(),
            "$2b$10$hash".to_string(),
        );
        user.id = Some(ObjectId::new());

        let view = UserView::from(user.clone());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["name"], "Ann");
        assert_eq!(json["email"], "ann@x.com");
        assert_eq!(json["id"], user.id.unwrap().to_hex());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("passwordHash").is_none());
    }
}
