//! User entity - an account known to the authentication collaborator

use chrono::{DateTime, Utc};

use crate::value_objects::{UserId, UserRole};

/// Registered account; anonymous complainants never have one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data needed to register an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl NewUser {
    /// Emails are compared case-insensitively, so they are stored lowercased
    pub fn new(name: &str, email: &str, role: UserRole) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role,
        }
    }
}
