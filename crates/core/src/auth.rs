use serde::{Deserialize, Serialize};

use crate::UserId;

/// User information resolved from the hosted auth provider's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    id: UserId,
    display_name: String,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from provider session data.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            email,
        }
    }

    /// Returns the stable user identifier from the provider.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
