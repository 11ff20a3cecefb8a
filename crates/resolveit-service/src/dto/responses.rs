//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Complaint and
//! timeline rows keep their column names; envelope fields are camelCase.

use chrono::{DateTime, Utc};
use resolveit_core::{ComplaintId, ComplaintStatus, SubmissionType, Urgency, UserId, UserRole};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Success envelope, `{"success": true, ...fields of T}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Account summary returned after signup and login
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Signup confirmation
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

// ============================================================================
// Complaint Responses
// ============================================================================

/// A complaint row, optionally joined with its submitter
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintResponse {
    pub id: ComplaintId,
    pub display_code: String,
    pub user_id: Option<UserId>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    pub submission_type: SubmissionType,
    pub contact_info: Option<String>,
    pub status: ComplaintStatus,
    pub assigned_to: Option<String>,
    pub resolution_notes: Option<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub escalated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// One timeline entry
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintUpdateResponse {
    pub id: i64,
    pub complaint_id: ComplaintId,
    pub old_status: Option<ComplaintStatus>,
    pub new_status: ComplaintStatus,
    pub update_message: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Answer to a successful submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedComplaintResponse {
    pub message: String,
    pub complaint_id: ComplaintId,
    pub display_code: String,
}

/// Public tracking view: the complaint and its public timeline
#[derive(Debug, Serialize)]
pub struct TrackComplaintResponse {
    pub complaint: ComplaintResponse,
    pub timeline: Vec<ComplaintUpdateResponse>,
}

#[derive(Debug, Serialize)]
pub struct ComplaintListResponse {
    pub complaints: Vec<ComplaintResponse>,
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub timeline: Vec<ComplaintUpdateResponse>,
}

/// Answer to an admin status change
#[derive(Debug, Serialize)]
pub struct UpdatedComplaintResponse {
    pub message: String,
    pub complaint: ComplaintResponse,
}

// ============================================================================
// Report Responses
// ============================================================================

/// Dashboard counters
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: i64,
    pub new: i64,
    pub pending: i64,
    pub resolved: i64,
    pub escalated: i64,
    pub critical: i64,
    pub high_priority: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsEnvelope {
    pub stats: StatsResponse,
}

/// One exported complaint
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub id: ComplaintId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub urgency: Urgency,
    pub status: ComplaintStatus,
    pub submission_type: SubmissionType,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

// ============================================================================
// Escalation Responses
// ============================================================================

/// Outcome of a manually triggered sweep
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationRunResponse {
    pub message: String,
    pub already_running: bool,
    pub rules_evaluated: usize,
    pub escalated: Vec<ComplaintId>,
    pub failures: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EscalationRuleResponse {
    pub id: i64,
    pub urgency_level: Urgency,
    pub hours_before_escalation: i32,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct EscalationRuleListResponse {
    pub rules: Vec<EscalationRuleResponse>,
}

#[derive(Debug, Serialize)]
pub struct EscalationRuleEnvelope {
    pub rule: EscalationRuleResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
