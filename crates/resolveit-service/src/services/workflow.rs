//! Workflow service - admin status transitions

use resolveit_core::entities::{StatusTransition, TransitionRecord};
use resolveit_core::ComplaintId;
use tracing::{info, instrument};

use crate::dto::UpdateComplaintRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const UPDATED_MESSAGE: &str = "Complaint updated successfully";

/// Workflow service
pub struct WorkflowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WorkflowService<'a> {
    /// Create a new WorkflowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Move a complaint to any status and log the change
    ///
    /// The row update and its log entries commit together.
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn apply_transition(
        &self,
        id: ComplaintId,
        request: UpdateComplaintRequest,
    ) -> ServiceResult<TransitionRecord> {
        let transition = StatusTransition::parse(
            &request.status,
            request.assigned_to,
            request.internal_notes,
            request.public_reply,
        )?;

        let record = self
            .ctx
            .complaint_repo()
            .apply_transition(id, &transition, self.ctx.now())
            .await?;

        info!(
            complaint_id = %id,
            new_status = %record.complaint.status,
            entries = record.updates.len(),
            "Transition applied"
        );

        Ok(record)
    }
}
