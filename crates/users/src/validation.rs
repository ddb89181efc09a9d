//! Input validation producing per-field error lists.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use tracing::error;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const PASSWORD_TOO_SHORT: &str =
    "This password is too short. It must contain at least 8 characters.";
pub const PASSWORD_NUMERIC: &str = "This password is entirely numeric.";
pub const PASSWORD_COMMON: &str = "This password is too common.";

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const NAME_MAX_LENGTH: usize = 150;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const PASSWORD_MIN_LENGTH: usize = 8;
const SIMILARITY_MIN_PART: usize = 4;

const USERNAME_PATTERN: &str = r"^[\w.@+-]+$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "12345678", "123456789", "1234567890",
    "qwerty123", "qwertyuiop", "iloveyou", "admin123", "letmein1", "welcome1",
    "abc12345", "11111111", "00000000", "football", "baseball", "sunshine",
];

/// Validation failures keyed by field name. Field order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Turns raw input into a validated value or a per-field error list.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, FieldErrors>;
}

fn matches(pattern: &str, value: &str) -> bool {
    match Regex::new(pattern) {
        Ok(regex) => regex.is_match(value),
        Err(err) => {
            error!(%pattern, error = %err, "invalid validation pattern");
            false
        }
    }
}

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Required, trimmed, non-blank string. Returns the trimmed value on success.
pub(crate) fn required_field(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    trim: bool,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return None;
    };

    let value = if trim { value.trim().to_string() } else { value };
    if value.trim().is_empty() {
        errors.add(field, BLANK);
        return None;
    }

    Some(value)
}

pub fn validate_username(username: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if username.chars().count() > USERNAME_MAX_LENGTH {
        errors.add("username", too_long(USERNAME_MAX_LENGTH));
    }
    if !matches(USERNAME_PATTERN, username) {
        errors.add("username", INVALID_USERNAME);
    }

    errors.into_result(())
}

/// Empty emails are allowed; non-empty ones must look like an address.
pub fn validate_email(email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if email.is_empty() {
        return Ok(());
    }
    if email.chars().count() > EMAIL_MAX_LENGTH {
        errors.add("email", too_long(EMAIL_MAX_LENGTH));
    }
    if !matches(EMAIL_PATTERN, email) {
        errors.add("email", INVALID_EMAIL);
    }

    errors.into_result(())
}

pub fn validate_name(field: &str, value: &str) -> Result<(), FieldErrors> {
    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(FieldErrors::single(field, too_long(NAME_MAX_LENGTH)));
    }
    Ok(())
}

pub fn password_similar(attribute: &str) -> String {
    format!("The password is too similar to the {attribute}.")
}

/// True when the password and the attribute value, or one of its word-like
/// parts, contain one another. Short parts such as `com` are ignored.
fn resembles(password: &str, value: &str) -> bool {
    let value = value.to_lowercase();
    if value.is_empty() {
        return false;
    }
    if password.contains(&value) || value.contains(password) {
        return true;
    }
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| part.chars().count() >= SIMILARITY_MIN_PART)
        .any(|part| password.contains(part))
}

/// Password strength checks. `attributes` pairs a human-readable name with
/// the user's value for it (username, email address, names) and feeds the
/// similarity rule, which reports the first attribute that matches.
pub fn validate_password(password: &str, attributes: &[(&str, &str)]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let lowered = password.to_lowercase();

    if !lowered.is_empty() {
        if let Some((attribute, _)) = attributes
            .iter()
            .find(|(_, value)| resembles(&lowered, value))
        {
            errors.add("password", password_similar(attribute));
        }
    }
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add("password", PASSWORD_TOO_SHORT);
    }
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        errors.add("password", PASSWORD_COMMON);
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        errors.add("password", PASSWORD_NUMERIC);
    }

    errors.into_result(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(validate_username("validuser").is_ok());
        assert!(validate_username("user_123").is_ok());
        assert!(validate_username("first.last+tag@host-name").is_ok());
        assert!(validate_username("ünïcode").is_ok());

        assert!(validate_username("user name").is_err());
        assert!(validate_username("user#name").is_err());

        let too_long = validate_username(&"a".repeat(151)).unwrap_err();
        assert_eq!(
            too_long.get("username").unwrap(),
            ["Ensure this field has no more than 150 characters."]
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name+tag@domain.co.uk").is_ok());

        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("test@").is_err());
    }

    #[test]
    fn test_password_validation_collects_every_failure() {
        assert!(validate_password("Sturdy-Passphrase-42", &[("username", "alice")]).is_ok());

        let errors = validate_password("1234", &[]).unwrap_err();
        assert_eq!(
            errors.get("password").unwrap(),
            [PASSWORD_TOO_SHORT, PASSWORD_NUMERIC]
        );

        let common = validate_password("Password123", &[]).unwrap_err();
        assert_eq!(common.get("password").unwrap(), [PASSWORD_COMMON]);

        let similar = validate_password("alice2024!", &[("username", "alice")]).unwrap_err();
        assert_eq!(
            similar.get("password").unwrap(),
            [password_similar("username")]
        );
    }

    #[test]
    fn test_password_similarity_covers_email_and_names() {
        let attributes = [
            ("username", "ghost_rider"),
            ("email address", "wanderer@example.com"),
            ("first name", "Marguerite"),
            ("last name", "Okonkwo"),
        ];

        assert!(validate_password("orchard-harvest-7", &attributes).is_ok());

        let by_email = validate_password("Wanderer-at-dusk", &attributes).unwrap_err();
        assert_eq!(
            by_email.get("password").unwrap(),
            [password_similar("email address")]
        );

        let by_first = validate_password("marguerite1999", &attributes).unwrap_err();
        assert_eq!(
            by_first.get("password").unwrap(),
            [password_similar("first name")]
        );

        let by_last = validate_password("OKONKWO-family", &attributes).unwrap_err();
        assert_eq!(
            by_last.get("password").unwrap(),
            [password_similar("last name")]
        );
    }

    #[test]
    fn test_password_similarity_ignores_short_and_empty_parts() {
        let attributes = [
            ("email address", "jo@example.com"),
            ("first name", ""),
        ];

        assert!(validate_password("compass-rose-88", &attributes).is_ok());
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_name("first_name", "").is_ok());
        assert!(validate_name("last_name", &"x".repeat(151)).is_err());
    }

    #[test]
    fn field_errors_merge_and_serialize() {
        let mut errors = FieldErrors::single("username", REQUIRED);
        errors.merge(FieldErrors::single("password", REQUIRED));
        errors.merge(FieldErrors::single("username", "second"));

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "password": [REQUIRED],
                "username": [REQUIRED, "second"],
            })
        );
    }

    #[test]
    fn required_field_trims_and_rejects_blank() {
        let mut errors = FieldErrors::new();

        assert_eq!(
            required_field(&mut errors, "username", Some("  bob ".to_string()), true),
            Some("bob".to_string())
        );
        assert_eq!(
            required_field(&mut errors, "password", Some("  pw  ".to_string()), false),
            Some("  pw  ".to_string())
        );
        assert_eq!(required_field(&mut errors, "username", Some("   ".into()), true), None);
        assert_eq!(required_field(&mut errors, "password", None, false), None);

        assert_eq!(errors.get("username").unwrap(), [BLANK]);
        assert_eq!(errors.get("password").unwrap(), [REQUIRED]);
    }
}
