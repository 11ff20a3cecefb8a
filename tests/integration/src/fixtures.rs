//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Unique across runs against the same database, not just within one.
pub fn unique_suffix() -> String {
    format!(
        "{}{}",
        chrono::Utc::now().timestamp_micros(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Resident {suffix}"),
            email: format!("resident{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Multipart complaint submission
#[derive(Debug, Clone)]
pub struct ComplaintSubmission {
    pub category: String,
    pub title: String,
    pub description: String,
    pub urgency: &'static str,
    pub submission_type: &'static str,
    pub files: Vec<(&'static str, Vec<u8>)>,
}

impl ComplaintSubmission {
    pub fn unique(submission_type: &'static str) -> Self {
        let suffix = unique_suffix();
        Self {
            category: format!("Category {suffix}"),
            title: format!("Broken streetlight {suffix}"),
            description: "The light on the corner has been out for a week".to_string(),
            urgency: "medium",
            submission_type,
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, name: &'static str, bytes: &[u8]) -> Self {
        self.files.push((name, bytes.to_vec()));
        self
    }

    pub fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("category", self.category)
            .text("title", self.title)
            .text("description", self.description)
            .text("urgency", self.urgency)
            .text("submissionType", self.submission_type);
        for (name, bytes) in self.files {
            form = form.part("files", Part::bytes(bytes).file_name(name));
        }
        form
    }
}

/// Answer to a submission
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedComplaint {
    pub success: bool,
    pub message: String,
    pub complaint_id: i64,
    pub display_code: String,
}

/// A complaint row
#[derive(Debug, Deserialize)]
pub struct ComplaintResponse {
    pub id: i64,
    pub display_code: String,
    pub user_id: Option<i64>,
    pub category: String,
    pub title: String,
    pub status: String,
    pub urgency: String,
    pub submission_type: String,
    pub assigned_to: Option<String>,
    pub attachments: Vec<String>,
    pub resolved_at: Option<String>,
}

/// One timeline entry
#[derive(Debug, Deserialize)]
pub struct TimelineEntry {
    pub old_status: Option<String>,
    pub new_status: String,
    pub update_message: String,
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct TrackResponse {
    pub success: bool,
    pub complaint: ComplaintResponse,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ComplaintList {
    pub success: bool,
    pub complaints: Vec<ComplaintResponse>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineList {
    pub timeline: Vec<TimelineEntry>,
}

/// Admin status change
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaint {
    pub status: String,
    pub assigned_to: Option<String>,
    pub internal_notes: Option<String>,
    pub public_reply: Option<String>,
}

impl UpdateComplaint {
    pub fn status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            assigned_to: None,
            internal_notes: None,
            public_reply: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: i64,
    pub new: i64,
    pub pending: i64,
    pub resolved: i64,
    pub escalated: i64,
    pub critical: i64,
    pub high_priority: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatsEnvelope {
    pub success: bool,
    pub stats: Stats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationRun {
    pub success: bool,
    pub already_running: bool,
    pub rules_evaluated: usize,
}

#[derive(Debug, Deserialize)]
pub struct EscalationRule {
    pub urgency_level: String,
    pub hours_before_escalation: i32,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct EscalationRuleList {
    pub rules: Vec<EscalationRule>,
}
