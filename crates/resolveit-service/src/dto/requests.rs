//! Request DTOs for API endpoints
//!
//! JSON bodies implement `Deserialize` and `Validate`; the multipart complaint
//! submission is collected by the HTTP layer into [`CreateComplaintRequest`].

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    /// Only `user` is accepted here; admins come from the bootstrap account
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Complaint Requests
// ============================================================================

/// One uploaded file of a submission
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Complaint submission collected from a multipart form
///
/// Urgency and submission type stay raw so that blank values fall back to
/// their defaults and unknown ones can be rejected with a proper message.
#[derive(Debug, Clone, Default)]
pub struct CreateComplaintRequest {
    pub category: String,
    pub title: String,
    pub description: String,
    pub urgency: Option<String>,
    pub submission_type: Option<String>,
    pub contact_info: Option<String>,
    pub files: Vec<UploadedFile>,
}

/// Admin status change
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintRequest {
    #[serde(default)]
    pub status: String,

    pub assigned_to: Option<String>,

    /// Older clients send the internal notes as `notes`
    #[serde(alias = "notes")]
    pub internal_notes: Option<String>,

    pub public_reply: Option<String>,
}

// ============================================================================
// Report Requests
// ============================================================================

/// Export query string; `"all"` and blank values disable a filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub format: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

// ============================================================================
// Escalation Requests
// ============================================================================

/// Create or replace the rule of one urgency level
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertEscalationRuleRequest {
    #[serde(alias = "hours_before_escalation")]
    #[validate(range(min = 1, message = "hoursBeforeEscalation must be positive"))]
    pub hours_before_escalation: i32,

    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
