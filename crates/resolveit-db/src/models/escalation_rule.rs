//! Escalation rule database model

use sqlx::FromRow;

/// Database model for escalation_rules table
#[derive(Debug, Clone, FromRow)]
pub struct EscalationRuleModel {
    pub id: i64,
    pub urgency_level: String,
    pub hours_before_escalation: i32,
    pub is_active: bool,
}
