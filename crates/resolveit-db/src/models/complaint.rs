//! Complaint database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for complaints table
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub urgency: String,
    pub submission_type: String,
    pub contact_info: Option<String>,
    pub status: String,
    pub assigned_to: Option<String>,
    pub resolution_notes: Option<String>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub escalated_at: Option<DateTime<Utc>>,
}

/// Complaint row left-joined with its submitter's display fields
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintWithUserModel {
    #[sqlx(flatten)]
    pub complaint: ComplaintModel,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// Database model for complaint_updates table
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintUpdateModel {
    pub id: i64,
    pub complaint_id: i64,
    pub old_status: Option<String>,
    pub new_status: String,
    pub update_message: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Single-row result of the dashboard aggregate
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ComplaintStatsModel {
    pub total: i64,
    pub new: i64,
    pub pending: i64,
    pub resolved: i64,
    pub escalated: i64,
    pub critical: i64,
    pub high_priority: i64,
}
