//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use resolveit_core::entities::{
    Complaint, ComplaintStats, ComplaintUpdate, ComplaintView, EscalationRule, User,
};

use super::responses::{
    ComplaintResponse, ComplaintUpdateResponse, EscalationRuleResponse, ExportRow,
    StatsResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

// ============================================================================
// Complaint Mappers
// ============================================================================

impl From<Complaint> for ComplaintResponse {
    fn from(complaint: Complaint) -> Self {
        Self {
            display_code: complaint.display_code(),
            id: complaint.id,
            user_id: complaint.submitter_id,
            category: complaint.category,
            title: complaint.title,
            description: complaint.description,
            urgency: complaint.urgency,
            submission_type: complaint.submission_type,
            contact_info: complaint.contact_info,
            status: complaint.status,
            assigned_to: complaint.assigned_to,
            resolution_notes: complaint.resolution_notes,
            attachments: complaint.attachments,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
            resolved_at: complaint.resolved_at,
            escalated_at: complaint.escalated_at,
            user_name: None,
            user_email: None,
        }
    }
}

impl From<ComplaintView> for ComplaintResponse {
    fn from(view: ComplaintView) -> Self {
        let mut response = Self::from(view.complaint);
        if let Some(submitter) = view.submitter {
            response.user_name = Some(submitter.name);
            response.user_email = Some(submitter.email);
        }
        response
    }
}

impl From<ComplaintUpdate> for ComplaintUpdateResponse {
    fn from(update: ComplaintUpdate) -> Self {
        Self {
            id: update.id,
            complaint_id: update.complaint_id,
            old_status: update.old_status,
            new_status: update.new_status,
            update_message: update.message,
            is_public: update.is_public,
            created_at: update.created_at,
        }
    }
}

// ============================================================================
// Report Mappers
// ============================================================================

impl From<ComplaintStats> for StatsResponse {
    fn from(stats: ComplaintStats) -> Self {
        Self {
            total: stats.total,
            new: stats.new,
            pending: stats.pending,
            resolved: stats.resolved,
            escalated: stats.escalated,
            critical: stats.critical,
            high_priority: stats.high_priority,
        }
    }
}

impl From<ComplaintView> for ExportRow {
    fn from(view: ComplaintView) -> Self {
        let (user_name, user_email) = match view.submitter {
            Some(submitter) => (Some(submitter.name), Some(submitter.email)),
            None => (None, None),
        };
        let complaint = view.complaint;
        Self {
            id: complaint.id,
            title: complaint.title,
            category: complaint.category,
            description: complaint.description,
            urgency: complaint.urgency,
            status: complaint.status,
            submission_type: complaint.submission_type,
            created_at: complaint.created_at,
            resolved_at: complaint.resolved_at,
            user_name,
            user_email,
        }
    }
}

// ============================================================================
// Escalation Mappers
// ============================================================================

impl From<EscalationRule> for EscalationRuleResponse {
    fn from(rule: EscalationRule) -> Self {
        Self {
            id: rule.id,
            urgency_level: rule.urgency_level,
            hours_before_escalation: rule.hours_before_escalation,
            is_active: rule.is_active,
        }
    }
}
