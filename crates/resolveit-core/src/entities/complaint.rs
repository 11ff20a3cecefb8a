//! Complaint entity - a submitted issue tracked through its status lifecycle

use chrono::{DateTime, Utc};

use crate::entities::update::{self, NewComplaintUpdate};
use crate::error::DomainError;
use crate::value_objects::{ComplaintId, ComplaintStatus, SubmissionType, Urgency, UserId};

/// Separator used when attachment paths are stored in a single column
pub const ATTACHMENT_SEPARATOR: char = ',';

/// Complaint aggregate holding the current state of one complaint
///
/// History lives in the update log; this struct only reflects the latest
/// committed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub id: ComplaintId,
    pub submitter_id: Option<UserId>,
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
}

impl Complaint {
    /// Public tracking code, e.g. `COMP42`
    pub fn display_code(&self) -> String {
        self.id.display_code()
    }

    /// Whether the escalation sweep may still act on this complaint
    #[inline]
    pub fn is_escalation_eligible(&self) -> bool {
        self.status.is_escalation_eligible()
    }

    /// Apply an admin status change and return the log entries it produces
    ///
    /// Always yields exactly one public entry, plus one internal entry when
    /// notes were given. `resolved_at` and `escalated_at` are only stamped the
    /// first time the matching status is entered.
    pub fn apply_transition(
        &mut self,
        transition: &StatusTransition,
        now: DateTime<Utc>,
    ) -> Vec<NewComplaintUpdate> {
        let old_status = self.status;
        let new_status = transition.new_status;

        self.status = new_status;
        self.updated_at = now;
        if let Some(assignee) = &transition.assigned_to {
            self.assigned_to = Some(assignee.clone());
        }
        if let Some(notes) = &transition.internal_notes {
            self.resolution_notes = Some(notes.clone());
        }
        self.stamp_milestones(now);

        let mut updates = vec![NewComplaintUpdate::public(
            Some(old_status),
            new_status,
            transition.summary(old_status),
        )];
        if let Some(notes) = &transition.internal_notes {
            updates.push(NewComplaintUpdate::internal(
                Some(old_status),
                new_status,
                update::internal_notes_message(notes),
            ));
        }
        updates
    }

    /// Auto-escalate the complaint if it is still eligible
    pub fn escalate(&mut self, now: DateTime<Utc>) -> Option<NewComplaintUpdate> {
        if !self.is_escalation_eligible() {
            return None;
        }

        let old_status = self.status;
        self.status = ComplaintStatus::Escalated;
        self.updated_at = now;
        self.stamp_milestones(now);

        Some(NewComplaintUpdate::public(
            Some(old_status),
            ComplaintStatus::Escalated,
            update::AUTO_ESCALATION_MESSAGE.to_string(),
        ))
    }

    fn stamp_milestones(&mut self, now: DateTime<Utc>) {
        match self.status {
            ComplaintStatus::Resolved if self.resolved_at.is_none() => {
                self.resolved_at = Some(now);
            }
            ComplaintStatus::Escalated if self.escalated_at.is_none() => {
                self.escalated_at = Some(now);
            }
            _ => {}
        }
    }

    /// Join attachment paths for storage in a single text column
    pub fn join_attachments(paths: &[String]) -> Option<String> {
        if paths.is_empty() {
            None
        } else {
            Some(paths.join(&ATTACHMENT_SEPARATOR.to_string()))
        }
    }

    /// Split a stored attachment column back into paths
    pub fn split_attachments(raw: Option<&str>) -> Vec<String> {
        raw.map(|value| {
            value
                .split(ATTACHMENT_SEPARATOR)
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
    }
}

/// Data needed to insert a new complaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    pub submitter_id: Option<UserId>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    pub submission_type: SubmissionType,
    pub contact_info: Option<String>,
    pub attachments: Vec<String>,
}

impl NewComplaint {
    /// Build a validated submission
    ///
    /// The submitter is only kept for public submissions; anonymous ones never
    /// record who sent them.
    pub fn new(
        category: &str,
        title: &str,
        description: &str,
        urgency: Urgency,
        submission_type: SubmissionType,
        contact_info: Option<String>,
        submitter_id: Option<UserId>,
    ) -> Result<Self, DomainError> {
        let category = required("Category", category)?;
        let title = required("Title", title)?;
        let description = required("Description", description)?;

        let submitter_id = match submission_type {
            SubmissionType::Public => submitter_id,
            SubmissionType::Anonymous => None,
        };

        Ok(Self {
            submitter_id,
            category,
            title,
            description,
            urgency,
            submission_type,
            contact_info: non_blank(contact_info),
            attachments: Vec::new(),
        })
    }

    /// Attach the staged file paths
    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Materialize the stored complaint once the store assigned an id
    pub fn into_complaint(self, id: ComplaintId, now: DateTime<Utc>) -> Complaint {
        Complaint {
            id,
            submitter_id: self.submitter_id,
            category: self.category,
            title: self.title,
            description: self.description,
            urgency: self.urgency,
            submission_type: self.submission_type,
            contact_info: self.contact_info,
            status: ComplaintStatus::New,
            assigned_to: None,
            resolution_notes: None,
            attachments: self.attachments,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            escalated_at: None,
        }
    }
}

/// A validated admin request to move a complaint to another status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub new_status: ComplaintStatus,
    pub assigned_to: Option<String>,
    pub internal_notes: Option<String>,
    pub public_reply: Option<String>,
}

impl StatusTransition {
    pub fn new(new_status: ComplaintStatus) -> Self {
        Self {
            new_status,
            assigned_to: None,
            internal_notes: None,
            public_reply: None,
        }
    }

    /// Parse raw request values; blank optionals count as absent
    pub fn parse(
        status: &str,
        assigned_to: Option<String>,
        internal_notes: Option<String>,
        public_reply: Option<String>,
    ) -> Result<Self, DomainError> {
        let status = status.trim();
        if status.is_empty() {
            return Err(DomainError::ValidationError("Status is required".to_string()));
        }
        let new_status = status
            .parse::<ComplaintStatus>()
            .map_err(|_| DomainError::InvalidStatus(status.to_string()))?;

        Ok(Self {
            new_status,
            assigned_to: non_blank(assigned_to),
            internal_notes: non_blank(internal_notes),
            public_reply: non_blank(public_reply),
        })
    }

    pub fn assigned_to(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    pub fn internal_notes(mut self, notes: impl Into<String>) -> Self {
        self.internal_notes = Some(notes.into());
        self
    }

    pub fn public_reply(mut self, reply: impl Into<String>) -> Self {
        self.public_reply = Some(reply.into());
        self
    }

    /// Public summary line for the log
    pub fn summary(&self, old_status: ComplaintStatus) -> String {
        let mut message = format!("Status updated from {old_status} to {}", self.new_status);
        if let Some(assignee) = &self.assigned_to {
            message.push_str(&format!(". Assigned to: {assignee}"));
        }
        if let Some(reply) = &self.public_reply {
            message.push_str(&format!(". {reply}"));
        }
        message
    }
}

fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
