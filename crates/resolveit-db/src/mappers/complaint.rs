//! Complaint entity <-> model mappers

use resolveit_core::entities::{
    Complaint, ComplaintStats, ComplaintUpdate, ComplaintView, NewComplaint, SubmitterSummary,
};
use resolveit_core::error::DomainError;
use resolveit_core::value_objects::{ComplaintId, UserId};

use super::parse_column;
use crate::models::{
    ComplaintModel, ComplaintStatsModel, ComplaintUpdateModel, ComplaintWithUserModel,
};

impl TryFrom<ComplaintModel> for Complaint {
    type Error = DomainError;

    fn try_from(model: ComplaintModel) -> Result<Self, Self::Error> {
        Ok(Complaint {
            id: ComplaintId::new(model.id),
            submitter_id: model.user_id.map(UserId::new),
            urgency: parse_column("complaints.urgency", &model.urgency)?,
            submission_type: parse_column("complaints.submission_type", &model.submission_type)?,
            status: parse_column("complaints.status", &model.status)?,
            attachments: Complaint::split_attachments(model.file_path.as_deref()),
            category: model.category,
            title: model.title,
            description: model.description,
            contact_info: model.contact_info,
            assigned_to: model.assigned_to,
            resolution_notes: model.resolution_notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
            resolved_at: model.resolved_at,
            escalated_at: model.escalated_at,
        })
    }
}

impl TryFrom<ComplaintWithUserModel> for ComplaintView {
    type Error = DomainError;

    fn try_from(model: ComplaintWithUserModel) -> Result<Self, Self::Error> {
        // the join only yields display fields when the user row still exists
        let submitter = match (model.user_name, model.user_email) {
            (Some(name), Some(email)) => Some(SubmitterSummary { name, email }),
            _ => None,
        };
        Ok(ComplaintView {
            complaint: Complaint::try_from(model.complaint)?,
            submitter,
        })
    }
}

impl TryFrom<ComplaintUpdateModel> for ComplaintUpdate {
    type Error = DomainError;

    fn try_from(model: ComplaintUpdateModel) -> Result<Self, Self::Error> {
        Ok(ComplaintUpdate {
            id: model.id,
            complaint_id: ComplaintId::new(model.complaint_id),
            old_status: model
                .old_status
                .as_deref()
                .map(|status| parse_column("complaint_updates.old_status", status))
                .transpose()?,
            new_status: parse_column("complaint_updates.new_status", &model.new_status)?,
            message: model.update_message,
            is_public: model.is_public,
            created_at: model.created_at,
        })
    }
}

impl From<ComplaintStatsModel> for ComplaintStats {
    fn from(model: ComplaintStatsModel) -> Self {
        ComplaintStats {
            total: model.total,
            new: model.new,
            pending: model.pending,
            resolved: model.resolved,
            escalated: model.escalated,
            critical: model.critical,
            high_priority: model.high_priority,
        }
    }
}

/// Column values for inserting a new complaint
pub struct ComplaintInsert<'a> {
    pub user_id: Option<i64>,
    pub category: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub urgency: &'static str,
    pub submission_type: &'static str,
    pub contact_info: Option<&'a str>,
    pub status: &'static str,
    pub file_path: Option<String>,
}

impl<'a> ComplaintInsert<'a> {
    pub fn new(complaint: &'a NewComplaint) -> Self {
        Self {
            user_id: complaint.submitter_id.map(UserId::into_inner),
            category: &complaint.category,
            title: &complaint.title,
            description: &complaint.description,
            urgency: complaint.urgency.as_str(),
            submission_type: complaint.submission_type.as_str(),
            contact_info: complaint.contact_info.as_deref(),
            status: resolveit_core::ComplaintStatus::New.as_str(),
            file_path: Complaint::join_attachments(&complaint.attachments),
        }
    }
}
