use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account record as stored in the `users` collection.
///
/// Passwords are stored and compared as-is; there is no hashing step, and
/// the login response returns the full record. See DESIGN.md before
/// deploying anything real on top of this.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(username: String, email: String, password: String) -> Self {
        Self {
            id: None,
            username,
            email,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_id() {
        let user = User::new("a".into(), "a@x.com".into(), "p".into());
        assert!(user.id.is_none());

        // _id must be omitted until MongoDB assigns one
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["username"], "a");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["password"], "p");
    }
}
