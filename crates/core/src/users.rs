//! Users

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::{
    ids::TypedId,
    resource::{Resource, Resync},
    validation::{ValidationError, required},
};

/// User Identifier
pub type UserId = TypedId<User>;

/// User account as listed by the server.
///
/// Any password the server sends back is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    #[serde(alias = "_id")]
    pub id: UserId,

    /// Login name
    pub username: String,
}

/// Username and password pair, used for login, signup and user writes.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login name
    pub username: String,

    /// Plain-text password
    pub password: String,
}

impl Credentials {
    /// Build credentials from raw form input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when either field is blank.
    pub fn new(username: &str, password: &str) -> Result<Self, ValidationError> {
        let username = required("username", username)?;

        if password.is_empty() {
            return Err(ValidationError::Missing("password"));
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// User form fields as typed by the user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Login name
    pub username: String,

    /// New password; never pre-filled
    pub password: String,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for UserDraft {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// The users collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Draft = UserDraft;
    type Payload = Credentials;

    const PATH: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
    const RESYNC: Resync = Resync::Patch;

    fn id(entity: &User) -> &UserId {
        &entity.id
    }

    fn edit_draft(entity: &User) -> UserDraft {
        UserDraft {
            username: entity.username.clone(),
            password: String::new(),
        }
    }

    fn validate(draft: &UserDraft) -> Result<Credentials, ValidationError> {
        Credentials::new(&draft.username, &draft.password)
    }
}
