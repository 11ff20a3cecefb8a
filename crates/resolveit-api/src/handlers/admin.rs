//! Admin handlers
//!
//! Every handler here requires an access token with the admin role.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use resolveit_core::ComplaintId;
use resolveit_service::dto::{
    ComplaintListResponse, EscalationRuleEnvelope, EscalationRuleListResponse,
    EscalationRunResponse, ExportQuery, StatsEnvelope, TimelineResponse, UpdateComplaintRequest,
    UpdatedComplaintResponse, UpsertEscalationRuleRequest,
};
use resolveit_service::services::workflow::UPDATED_MESSAGE;
use resolveit_service::{
    ComplaintService, EscalationService, ExportPayload, ReportService, WorkflowService,
};

use crate::extractors::{AdminUser, JsonBody, ValidatedJson};
use crate::response::{ApiError, ApiResult, CsvAttachment, Success};
use crate::state::AppState;

fn complaint_id(raw: &str) -> Result<ComplaintId, ApiError> {
    ComplaintId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid complaint id format"))
}

/// GET /admin/complaints
pub async fn list_complaints(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Success<ComplaintListResponse>> {
    let service = ComplaintService::new(state.service_context());
    let complaints = service.list_all().await?;
    Ok(Success(ComplaintListResponse { complaints }))
}

/// Change the status of a complaint
///
/// PUT /admin/complaints/{id}
pub async fn update_complaint(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateComplaintRequest>,
) -> ApiResult<Success<UpdatedComplaintResponse>> {
    let id = complaint_id(&id)?;

    let service = WorkflowService::new(state.service_context());
    let record = service.apply_transition(id, request).await?;
    tracing::info!(complaint_id = %id, admin_id = %admin.user_id, "Complaint updated by admin");

    Ok(Success(UpdatedComplaintResponse {
        message: UPDATED_MESSAGE.to_string(),
        complaint: record.complaint.into(),
    }))
}

/// Full timeline including internal notes
///
/// GET /admin/complaints/{id}/timeline
pub async fn complaint_timeline(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Success<TimelineResponse>> {
    let id = complaint_id(&id)?;

    let service = ComplaintService::new(state.service_context());
    let timeline = service.timeline(id, true).await?;
    Ok(Success(TimelineResponse { timeline }))
}

/// GET /admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Success<StatsEnvelope>> {
    let service = ReportService::new(state.service_context());
    let stats = service.stats().await?;
    Ok(Success(StatsEnvelope { stats }))
}

/// Filtered export as a CSV download or a bare JSON array
///
/// GET /admin/export?format=csv|json&status=&category=&dateFrom=&dateTo=
pub async fn export(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let service = ReportService::new(state.service_context());
    let response = match service.export(query).await? {
        ExportPayload::Csv { file_name, body } => CsvAttachment { file_name, body }.into_response(),
        ExportPayload::Json(rows) => Json(rows).into_response(),
    };
    Ok(response)
}

/// Run an escalation sweep now
///
/// POST /admin/escalation/run
pub async fn run_escalation(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Success<EscalationRunResponse> {
    tracing::info!(admin_id = %admin.user_id, "Manual escalation sweep requested");
    let service = EscalationService::new(state.service_context());
    Success(service.run_sweep().await.into())
}

/// GET /admin/escalation-rules
pub async fn list_escalation_rules(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Success<EscalationRuleListResponse>> {
    let service = EscalationService::new(state.service_context());
    let rules = service.list_rules().await?;
    Ok(Success(EscalationRuleListResponse { rules }))
}

/// Create or replace the rule for one urgency level
///
/// PUT /admin/escalation-rules/{urgency}
pub async fn upsert_escalation_rule(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(urgency): Path<String>,
    ValidatedJson(request): ValidatedJson<UpsertEscalationRuleRequest>,
) -> ApiResult<Success<EscalationRuleEnvelope>> {
    let service = EscalationService::new(state.service_context());
    let rule = service.upsert_rule(&urgency, request).await?;
    Ok(Success(EscalationRuleEnvelope { rule }))
}
