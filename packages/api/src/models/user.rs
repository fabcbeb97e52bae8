//! # User model and authentication request bodies
//!
//! ## [`User`]
//!
//! The identity snapshot the server returns from `login`, `user` and `admin/users`.
//! Login and identity responses omit `id` and `email`, the admin listing omits
//! `email`, so both are optional. Unknown fields (such as the server's `message`)
//! are ignored.
//!
//! The server models a creator request by switching `role` to `"creator"` with
//! `approved = false`; approval flips `approved` to `true`. Two helpers read that
//! back: [`User::creator_request_pending`] and [`User::can_publish`].
//!
//! ## Request bodies
//!
//! - [`Credentials`] — `POST /login`
//! - [`SignupForm`] — `POST /signup`, with an optional referral code attributing the
//!   new account to an existing user.

use serde::{Deserialize, Serialize};

/// Account role. Gates catalog writes (creator) and the admin user list (admin).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    #[serde(rename = "user", alias = "regular")]
    Regular,
    Creator,
    Admin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Regular => "user",
            Role::Creator => "creator",
            Role::Admin => "admin",
        }
    }
}

/// User information as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub approved: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The account asked to become a creator and no admin approved it yet.
    pub fn creator_request_pending(&self) -> bool {
        self.role == Role::Creator && !self.approved
    }

    /// Approved creators may add products to the catalog.
    pub fn can_publish(&self) -> bool {
        self.role == Role::Creator && self.approved
    }

    /// Regular accounts without a pending request may ask for creator status.
    pub fn can_request_creator(&self) -> bool {
        self.role == Role::Regular
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl SignupForm {
    /// Build a form; a blank referral code is treated as absent.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        referral_code: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            referral_code: referral_code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}
