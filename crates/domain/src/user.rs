use gatewise_core::{AppError, AppResult, UserId};
use serde::{Deserialize, Serialize};

/// Validated referral code attached to a user profile.
///
/// Codes are opaque tokens minted by the backend; this layer only requires
/// them to be non-empty so they can serve as cache key material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferralCode(String);

impl ReferralCode {
    /// Creates a validated referral code.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "referral code must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ReferralCode> for String {
    fn from(value: ReferralCode) -> Self {
        value.0
    }
}

/// Profile record resolved for the authenticated user.
///
/// The profile may resolve after the session identity does; consumers that
/// need the referral code must tolerate its temporary absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    display_name: String,
    referral_code: ReferralCode,
}

impl UserProfile {
    /// Creates a profile from resolved backend data.
    #[must_use]
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        referral_code: ReferralCode,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            referral_code,
        }
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the profile display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the referral code minted for this user.
    #[must_use]
    pub fn referral_code(&self) -> &ReferralCode {
        &self.referral_code
    }
}
