//! Escalation rules - urgency specific time thresholds for the sweep

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::Urgency;

/// Maps an urgency level to the hours a complaint may stay unresolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationRule {
    pub id: i64,
    pub urgency_level: Urgency,
    pub hours_before_escalation: i32,
    pub is_active: bool,
}

impl EscalationRule {
    /// Complaints created at or before this instant are overdue
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::hours(i64::from(self.hours_before_escalation))
    }

    /// Reject non-positive thresholds
    pub fn validate_hours(hours: i32) -> Result<i32, DomainError> {
        if hours <= 0 {
            return Err(DomainError::ValidationError(
                "hours_before_escalation must be positive".to_string(),
            ));
        }
        Ok(hours)
    }
}
