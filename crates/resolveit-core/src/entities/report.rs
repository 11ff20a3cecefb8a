//! Read models used by the query and export layer

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{Complaint, ComplaintUpdate};
use crate::value_objects::ComplaintStatus;

/// Display fields of the account that filed a complaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterSummary {
    pub name: String,
    pub email: String,
}

/// A complaint joined with its submitter, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintView {
    pub complaint: Complaint,
    pub submitter: Option<SubmitterSummary>,
}

/// Result of a committed status transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    pub complaint: Complaint,
    pub updates: Vec<ComplaintUpdate>,
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintStats {
    pub total: i64,
    pub new: i64,
    /// Under Review plus In Progress
    pub pending: i64,
    pub resolved: i64,
    pub escalated: i64,
    pub critical: i64,
    pub high_priority: i64,
}

impl ComplaintStats {
    /// Tally counters from an in-memory set of complaints
    pub fn tally<'a>(complaints: impl IntoIterator<Item = &'a Complaint>) -> Self {
        use crate::value_objects::Urgency;

        complaints.into_iter().fold(Self::default(), |mut stats, c| {
            stats.total += 1;
            match c.status {
                ComplaintStatus::New => stats.new += 1,
                ComplaintStatus::Resolved => stats.resolved += 1,
                ComplaintStatus::Escalated => stats.escalated += 1,
                status if status.is_pending() => stats.pending += 1,
                _ => {}
            }
            match c.urgency {
                Urgency::Critical => stats.critical += 1,
                Urgency::High => stats.high_priority += 1,
                _ => {}
            }
            stats
        })
    }
}

/// Optional filters applied by the export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub status: Option<ComplaintStatus>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ExportFilter {
    /// Inclusive lower bound, start of `date_from`
    pub fn created_from(&self) -> Option<DateTime<Utc>> {
        self.date_from
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Exclusive upper bound, start of the day after `date_to`
    ///
    /// Timestamps carry sub-second precision, so the whole of `date_to` is
    /// only covered by comparing against the next midnight.
    pub fn created_before(&self) -> Option<DateTime<Utc>> {
        self.date_to
            .and_then(|date| date.succ_opt())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Whether a complaint passes every filter
    pub fn matches(&self, complaint: &Complaint) -> bool {
        if self.status.is_some_and(|status| status != complaint.status) {
            return false;
        }
        if self
            .category
            .as_deref()
            .is_some_and(|category| category != complaint.category)
        {
            return false;
        }
        if self.created_from().is_some_and(|from| complaint.created_at < from) {
            return false;
        }
        if self
            .created_before()
            .is_some_and(|before| complaint.created_at >= before)
        {
            return false;
        }
        true
    }
}
