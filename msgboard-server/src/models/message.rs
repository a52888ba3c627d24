//! Message entity and its validated fields

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for usernames (characters)
const MAX_USERNAME_LEN: usize = 64;

/// Maximum length for message content (64KB)
const MAX_CONTENT_LEN: usize = 65536;

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Rules
    /// - Must contain at least one non-whitespace character
    /// - Max 64 characters
    ///
    /// # Example
    /// ```
    /// use msgboard_server::models::Username;
    ///
    /// assert!(Username::new("John").is_ok());
    /// assert!(Username::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }

        if s.chars().count() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
                unit: "characters",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Validated message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create new message content.
    ///
    /// # Rules
    /// - Must contain at least one non-whitespace character
    /// - Max 64KB (65536 bytes)
    ///
    /// # Example
    /// ```
    /// use msgboard_server::models::MessageContent;
    ///
    /// assert!(MessageContent::new("Hello, World!").is_ok());
    /// assert!(MessageContent::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        if s.len() > MAX_CONTENT_LEN {
            return Err(ValidationError::TooLong {
                field: "content",
                max: MAX_CONTENT_LEN,
                unit: "bytes",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// A message record.
///
/// Fields are private: a `Message` is either built by [`Message::new`] from
/// validated parts or loaded from the store, and the only mutation is
/// [`Message::replace_content`]. `id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Message {
    id: Uuid,
    username: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    like_count: i32,
}

impl Message {
    /// Create a new message with the given id, stamped at `now`.
    pub fn new(id: Uuid, username: Username, content: MessageContent, now: DateTime<Utc>) -> Self {
        // TIMESTAMPTZ keeps microseconds; truncate so stored and in-memory values agree
        let now = now.trunc_subsecs(6);
        Self {
            id,
            username: username.into_string(),
            content: content.into_string(),
            created_at: now,
            updated_at: now,
            like_count: 0,
        }
    }

    /// Replace the content and refresh `updated_at`.
    pub fn replace_content(&mut self, content: MessageContent, now: DateTime<Utc>) {
        self.content = content.into_string();
        self.updated_at = now.trunc_subsecs(6);
    }

    pub(crate) fn keep_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn like_count(&self) -> i32 {
        self.like_count
    }
}
