use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database primary key
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Email address, empty when not provided
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Inactive accounts cannot authenticate
    pub is_active: bool,
    /// When the account was created (RFC 3339)
    pub date_joined: String,
    /// When the account was last modified (RFC 3339)
    pub updated_at: String,
}

impl User {
    /// Full name as "first last", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }
}

/// A validated user ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Build the stored record for this user, stamped with the current time.
    pub fn into_user(self, id: i64) -> User {
        let now = Utc::now().to_rfc3339();
        User {
            id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password_hash,
            is_active: true,
            date_joined: now.clone(),
            updated_at: now,
        }
    }
}

/// Profile fields to overwrite. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }

    /// Apply the changes to an in-memory record.
    pub fn apply(&self, user: &mut User) {
        if let Some(ref email) = self.email {
            user.email = email.clone();
        }
        if let Some(ref first_name) = self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(ref last_name) = self.last_name {
            user.last_name = last_name.clone();
        }
        user.updated_at = Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[test]
    fn into_user_marks_account_active() {
        let user = new_user().into_user(7);

        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert!(user.can_authenticate());
        assert_eq!(user.date_joined, user.updated_at);
    }

    #[test]
    fn full_name_trims_missing_parts() {
        let user = new_user().into_user(1);
        assert_eq!(user.full_name(), "Alice");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = new_user().into_user(1);
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut user = new_user().into_user(1);
        let changes = UserChanges {
            last_name: Some("Liddell".to_string()),
            ..Default::default()
        };

        assert!(!changes.is_empty());
        changes.apply(&mut user);

        assert_eq!(user.first_name, "Alice");
        assert_eq!(user.last_name, "Liddell");
        assert_eq!(user.email, "alice@example.com");
    }
}
