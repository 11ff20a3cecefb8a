//! PostgreSQL implementation of EscalationRuleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use resolveit_core::entities::EscalationRule;
use resolveit_core::traits::{EscalationRuleRepository, RepoResult};
use resolveit_core::value_objects::Urgency;

use crate::mappers::convert_all;
use crate::models::EscalationRuleModel;

use super::error::map_missing_table;

const RULES_TABLE: &str = "escalation_rules";

/// PostgreSQL implementation of EscalationRuleRepository
#[derive(Clone)]
pub struct PgEscalationRuleRepository {
    pool: PgPool,
}

impl PgEscalationRuleRepository {
    /// Create a new PgEscalationRuleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EscalationRuleRepository for PgEscalationRuleRepository {
    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<EscalationRule>> {
        let rows = sqlx::query_as::<_, EscalationRuleModel>(
            r"
            SELECT id, urgency_level, hours_before_escalation, is_active
            FROM escalation_rules
            WHERE is_active = TRUE
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_missing_table(e, RULES_TABLE))?;

        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<EscalationRule>> {
        let rows = sqlx::query_as::<_, EscalationRuleModel>(
            r"
            SELECT id, urgency_level, hours_before_escalation, is_active
            FROM escalation_rules
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_missing_table(e, RULES_TABLE))?;

        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn upsert(
        &self,
        urgency: Urgency,
        hours_before_escalation: i32,
        is_active: bool,
    ) -> RepoResult<EscalationRule> {
        let model = sqlx::query_as::<_, EscalationRuleModel>(
            r"
            INSERT INTO escalation_rules (urgency_level, hours_before_escalation, is_active)
            VALUES ($1, $2, $3)
            ON CONFLICT (urgency_level) DO UPDATE
            SET hours_before_escalation = EXCLUDED.hours_before_escalation,
                is_active = EXCLUDED.is_active
            RETURNING id, urgency_level, hours_before_escalation, is_active
            ",
        )
        .bind(urgency.as_str())
        .bind(hours_before_escalation)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_missing_table(e, RULES_TABLE))?;

        EscalationRule::try_from(model)
    }
}
