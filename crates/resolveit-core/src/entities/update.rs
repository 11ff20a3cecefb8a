//! Timeline entries - the append-only update log of a complaint

use chrono::{DateTime, Utc};

use crate::value_objects::{ComplaintId, ComplaintStatus};

pub const CREATION_MESSAGE: &str = "Complaint submitted successfully";
pub const AUTO_ESCALATION_MESSAGE: &str = "Auto-escalated due to urgency level and time elapsed";

pub(crate) fn internal_notes_message(notes: &str) -> String {
    format!("Internal notes: {notes}")
}

/// A persisted log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintUpdate {
    pub id: i64,
    pub complaint_id: ComplaintId,
    /// `None` only for the creation entry
    pub old_status: Option<ComplaintStatus>,
    pub new_status: ComplaintStatus,
    pub message: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// A log entry waiting to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaintUpdate {
    pub old_status: Option<ComplaintStatus>,
    pub new_status: ComplaintStatus,
    pub message: String,
    pub is_public: bool,
}

impl NewComplaintUpdate {
    pub fn public(
        old_status: Option<ComplaintStatus>,
        new_status: ComplaintStatus,
        message: String,
    ) -> Self {
        Self {
            old_status,
            new_status,
            message,
            is_public: true,
        }
    }

    pub fn internal(
        old_status: Option<ComplaintStatus>,
        new_status: ComplaintStatus,
        message: String,
    ) -> Self {
        Self {
            old_status,
            new_status,
            message,
            is_public: false,
        }
    }

    /// Entry written alongside every new complaint
    pub fn creation() -> Self {
        Self::public(None, ComplaintStatus::New, CREATION_MESSAGE.to_string())
    }

    /// Attach the entry to its complaint once persisted
    pub fn into_update(
        self,
        id: i64,
        complaint_id: ComplaintId,
        created_at: DateTime<Utc>,
    ) -> ComplaintUpdate {
        ComplaintUpdate {
            id,
            complaint_id,
            old_status: self.old_status,
            new_status: self.new_status,
            message: self.message,
            is_public: self.is_public,
            created_at,
        }
    }
}
