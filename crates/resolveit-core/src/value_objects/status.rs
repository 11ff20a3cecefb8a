//! Closed vocabularies stored as text columns
//!
//! Every enum here round-trips through its `as_str` form, which is exactly the
//! value persisted in PostgreSQL and exchanged over JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error when a stored or submitted value is not part of a vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ============================================================================
// Complaint Status
// ============================================================================

/// Lifecycle state of a complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComplaintStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Resolved")]
    Resolved,
    #[serde(rename = "Closed")]
    Closed,
    #[serde(rename = "Escalated")]
    Escalated,
}

impl ComplaintStatus {
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::UnderReview,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
        Self::Escalated,
    ];

    /// Statuses the escalation sweep never touches
    pub const SWEEP_EXEMPT: [Self; 3] = [Self::Resolved, Self::Closed, Self::Escalated];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::UnderReview => "Under Review",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Escalated => "Escalated",
        }
    }

    /// Resolved and Closed end the normal lifecycle, although admins may still
    /// move such complaints elsewhere
    #[inline]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Whether the sweep may auto-escalate a complaint in this state
    #[inline]
    pub fn is_escalation_eligible(self) -> bool {
        !self.is_settled() && self != Self::Escalated
    }

    /// Counted as "pending" by the dashboard statistics
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::UnderReview | Self::InProgress)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// How urgent the complainant says the issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|urgency| urgency.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("urgency", s))
    }
}

// ============================================================================
// Submission Type
// ============================================================================

/// Whether the complainant chose to stay anonymous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    #[default]
    Public,
    Anonymous,
}

impl SubmissionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Anonymous => "anonymous",
        }
    }

    #[inline]
    pub fn is_anonymous(self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "anonymous" => Ok(Self::Anonymous),
            other => Err(UnknownVariant::new("submission type", other)),
        }
    }
}

// ============================================================================
// User Role
// ============================================================================

/// Role handed out by the authentication collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownVariant::new("role", other)),
        }
    }
}
