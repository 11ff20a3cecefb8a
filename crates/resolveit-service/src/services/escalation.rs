//! Escalation service - the overdue-complaint sweep and its rules
//!
//! A sweep walks the active rules in storage order, selects complaints of the
//! rule's urgency that are still open and older than the threshold, and
//! escalates each one in its own transaction. Only one sweep runs at a time
//! per process; failures are logged and never abort the sweep.

use resolveit_core::entities::EscalationRule;
use resolveit_core::{ComplaintId, Urgency};
use tracing::{debug, error, info, instrument, warn};

use crate::dto::{EscalationRuleResponse, EscalationRunResponse, UpsertEscalationRuleRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// What one completed sweep did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscalationReport {
    pub rules_evaluated: usize,
    pub escalated: Vec<ComplaintId>,
    pub failures: usize,
    /// The rules table is not provisioned; nothing was evaluated
    pub configuration_absent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    Completed(EscalationReport),
    /// Another sweep holds the guard; no data was touched
    AlreadyRunning,
}

impl From<SweepOutcome> for EscalationRunResponse {
    fn from(outcome: SweepOutcome) -> Self {
        match outcome {
            SweepOutcome::Completed(report) => Self {
                message: "Escalation check completed".to_string(),
                already_running: false,
                rules_evaluated: report.rules_evaluated,
                escalated: report.escalated,
                failures: report.failures,
            },
            SweepOutcome::AlreadyRunning => Self {
                message: "Escalation check already running".to_string(),
                already_running: true,
                rules_evaluated: 0,
                escalated: Vec::new(),
                failures: 0,
            },
        }
    }
}

/// Escalation service
pub struct EscalationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EscalationService<'a> {
    /// Create a new EscalationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run one sweep unless another is in progress
    #[instrument(skip(self))]
    pub async fn run_sweep(&self) -> SweepOutcome {
        let Ok(_guard) = self.ctx.sweep_guard().try_lock() else {
            info!("Escalation sweep already running, skipping");
            return SweepOutcome::AlreadyRunning;
        };

        let now = self.ctx.now();
        let mut report = EscalationReport::default();

        let rules = match self.ctx.rule_repo().find_active().await {
            Ok(rules) => rules,
            Err(e) if e.is_configuration_absent() => {
                warn!(error = %e, "Escalation rules not provisioned, skipping sweep");
                report.configuration_absent = true;
                return SweepOutcome::Completed(report);
            }
            Err(e) => {
                error!(error = %e, "Failed to load escalation rules");
                report.failures += 1;
                return SweepOutcome::Completed(report);
            }
        };

        for rule in &rules {
            report.rules_evaluated += 1;
            let cutoff = rule.cutoff(now);

            let candidates = match self
                .ctx
                .complaint_repo()
                .find_escalation_candidates(rule.urgency_level, cutoff)
                .await
            {
                Ok(candidates) => candidates,
                Err(e) => {
                    error!(urgency = %rule.urgency_level, error = %e, "Failed to select escalation candidates");
                    report.failures += 1;
                    continue;
                }
            };

            for candidate in candidates {
                match self.ctx.complaint_repo().escalate(candidate.id, now).await {
                    Ok(Some(update)) => {
                        info!(
                            complaint_id = %candidate.id,
                            urgency = %rule.urgency_level,
                            old_status = ?update.old_status,
                            "Auto-escalated complaint"
                        );
                        report.escalated.push(candidate.id);
                    }
                    Ok(None) => {
                        debug!(complaint_id = %candidate.id, "Candidate no longer eligible");
                    }
                    Err(e) => {
                        error!(complaint_id = %candidate.id, error = %e, "Failed to escalate complaint");
                        report.failures += 1;
                    }
                }
            }
        }

        info!(
            rules = report.rules_evaluated,
            escalated = report.escalated.len(),
            failures = report.failures,
            "Escalation sweep finished"
        );
        SweepOutcome::Completed(report)
    }

    /// All rules in storage order
    #[instrument(skip(self))]
    pub async fn list_rules(&self) -> ServiceResult<Vec<EscalationRuleResponse>> {
        let rules = self.ctx.rule_repo().list().await?;
        Ok(rules.into_iter().map(Into::into).collect())
    }

    /// Create or replace the rule of one urgency level
    #[instrument(skip(self, request))]
    pub async fn upsert_rule(
        &self,
        urgency: &str,
        request: UpsertEscalationRuleRequest,
    ) -> ServiceResult<EscalationRuleResponse> {
        let urgency: Urgency = urgency
            .trim()
            .parse()
            .map_err(|_| ServiceError::validation(format!("Invalid urgency: {urgency}")))?;
        let hours = EscalationRule::validate_hours(request.hours_before_escalation)?;

        let rule = self
            .ctx
            .rule_repo()
            .upsert(urgency, hours, request.is_active)
            .await?;

        info!(urgency = %urgency, hours, active = rule.is_active, "Escalation rule saved");
        Ok(rule.into())
    }
}
