use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const NAME_REQUIRED: &str = "Name is required and cannot be empty";
pub const VALID_EMAIL_REQUIRED: &str = "Valid email is required";

/// `local@domain.tld` with no whitespace and a single `@`
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Names must contain something other than whitespace
fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(
            ValidationError::new("name_required").with_message(Cow::Borrowed(NAME_REQUIRED))
        );
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(
            ValidationError::new("invalid_email").with_message(Cow::Borrowed(VALID_EMAIL_REQUIRED))
        );
    }
    Ok(())
}

/// `null` reads as an empty string, which then fails validation.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A key that is present counts as provided even when `null`; absent keys
/// fall back to `None` through `#[serde(default)]`.
fn present_as_some<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    null_as_empty(deserializer).map(Some)
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned at creation
    #[schema(example = "0190b2d4-6a2f-7c1e-9d3b-5e8f1a2b3c4d")]
    pub id: String,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Contact email
    #[schema(example = "john@example.com")]
    pub email: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new user
///
/// Missing or `null` fields deserialize as empty strings and are rejected by
/// validation in the service layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_name"))]
    #[schema(example = "John Doe")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "john@example.com")]
    pub email: String,
}

/// DTO for updating an existing user; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(
        default,
        deserialize_with = "present_as_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_as_some",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom(function = "validate_email"))]
    pub email: Option<String>,
}

impl User {
    /// Build a new user with a fresh id and the current time.
    ///
    /// Ids are UUIDv7: a millisecond timestamp followed by random bits, so
    /// they are unique within the process and sort by creation time.
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name,
            email,
            created_at: Utc::now(),
        }
    }

    /// Merge the provided fields; `id` and `created_at` never change.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        User::new(input.name, input.email)
    }
}
