//! Request and response shapes for user operations.

use jackfruit_database::{User, UserChanges};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::{
    required_field, validate_email, validate_name, validate_password, validate_username,
    FieldErrors, Validate,
};

/// Registration payload. Every field is optional at the wire level so that
/// missing fields are reported alongside the other validation failures.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Registration input that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Validate for RegisterRequest {
    type Output = ValidRegistration;

    fn validate(self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = required_field(&mut errors, "username", self.username, true);
        if let Some(ref username) = username {
            if let Err(e) = validate_username(username) {
                errors.merge(e);
            }
        }

        let email = self.email.map(|e| e.trim().to_string()).unwrap_or_default();
        if let Err(e) = validate_email(&email) {
            errors.merge(e);
        }

        let first_name = self.first_name.map(|n| n.trim().to_string()).unwrap_or_default();
        let last_name = self.last_name.map(|n| n.trim().to_string()).unwrap_or_default();
        for (field, value) in [("first_name", &first_name), ("last_name", &last_name)] {
            if let Err(e) = validate_name(field, value) {
                errors.merge(e);
            }
        }

        let password = required_field(&mut errors, "password", self.password, false);
        if let Some(ref password) = password {
            let attributes = [
                ("username", username.as_deref().unwrap_or_default()),
                ("email address", email.as_str()),
                ("first name", first_name.as_str()),
                ("last name", last_name.as_str()),
            ];
            if let Err(e) = validate_password(password, &attributes) {
                errors.merge(e);
            }
        }

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok(ValidRegistration {
                username,
                password,
                email,
                first_name,
                last_name,
            }),
            _ => Err(errors),
        }
    }
}

/// Profile update payload. Absent fields keep their stored value; the
/// username cannot be changed through this request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Validate for ProfileUpdateRequest {
    type Output = UserChanges;

    fn validate(self) -> Result<UserChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let changes = UserChanges {
            email: self.email.map(|e| e.trim().to_string()),
            first_name: self.first_name.map(|n| n.trim().to_string()),
            last_name: self.last_name.map(|n| n.trim().to_string()),
        };

        if let Some(ref email) = changes.email {
            if let Err(e) = validate_email(email) {
                errors.merge(e);
            }
        }
        if let Some(ref first_name) = changes.first_name {
            if let Err(e) = validate_name("first_name", first_name) {
                errors.merge(e);
            }
        }
        if let Some(ref last_name) = changes.last_name {
            if let Err(e) = validate_name("last_name", last_name) {
                errors.merge(e);
            }
        }

        errors.into_result(changes)
    }
}

/// The public view of a user returned by every user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRepresentation {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserRepresentation {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
