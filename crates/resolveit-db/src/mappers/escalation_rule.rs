//! Escalation rule entity <-> model mapper

use resolveit_core::entities::EscalationRule;
use resolveit_core::error::DomainError;

use super::parse_column;
use crate::models::EscalationRuleModel;

impl TryFrom<EscalationRuleModel> for EscalationRule {
    type Error = DomainError;

    fn try_from(model: EscalationRuleModel) -> Result<Self, Self::Error> {
        Ok(EscalationRule {
            id: model.id,
            urgency_level: parse_column("escalation_rules.urgency_level", &model.urgency_level)?,
            hours_before_escalation: model.hours_before_escalation,
            is_active: model.is_active,
        })
    }
}
