//! Complaint handlers
//!
//! Submission, public tracking and the per-submitter listings.

use axum::extract::{Path, State};
use resolveit_core::UserId;
use resolveit_service::dto::{
    ComplaintListResponse, CreatedComplaintResponse, TrackComplaintResponse,
};
use resolveit_service::ComplaintService;

use crate::extractors::{AuthUser, ComplaintForm, OptionalAuthUser};
use crate::response::{ApiError, ApiResult, Created, Success};
use crate::state::AppState;

/// Submit a complaint with optional attachments
///
/// POST /complaints
///
/// A public submission is linked to the bearer of the token, if any.
pub async fn create_complaint(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ComplaintForm(request): ComplaintForm,
) -> ApiResult<Created<Success<CreatedComplaintResponse>>> {
    let service = ComplaintService::new(state.service_context());
    let response = service.create(request, auth.user_id()).await?;
    Ok(Created(Success(response)))
}

/// Track a complaint by numeric id or display code
///
/// GET /complaints/track/{identifier}
pub async fn track_complaint(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<Success<TrackComplaintResponse>> {
    let service = ComplaintService::new(state.service_context());
    let response = service.track(&identifier).await?;
    Ok(Success(response))
}

/// GET /complaints/anonymous
pub async fn list_anonymous(
    State(state): State<AppState>,
) -> ApiResult<Success<ComplaintListResponse>> {
    let service = ComplaintService::new(state.service_context());
    let complaints = service.list_anonymous().await?;
    Ok(Success(ComplaintListResponse { complaints }))
}

/// Complaints filed by the caller
///
/// GET /users/@me/complaints
pub async fn list_my_complaints(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Success<ComplaintListResponse>> {
    let service = ComplaintService::new(state.service_context());
    let complaints = service.list_for_submitter(auth.user_id).await?;
    Ok(Success(ComplaintListResponse { complaints }))
}

/// GET /users/{user_id}/complaints
pub async fn list_user_complaints(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Success<ComplaintListResponse>> {
    let user_id = UserId::parse(&user_id)
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = ComplaintService::new(state.service_context());
    let complaints = service.list_for_submitter(user_id).await?;
    Ok(Success(ComplaintListResponse { complaints }))
}

/// Legacy listing where `0` or `null` select the anonymous bucket
///
/// GET /user-complaints/{user_id}
pub async fn list_legacy(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Success<ComplaintListResponse>> {
    let service = ComplaintService::new(state.service_context());
    let complaints = service.list_legacy(&user_id).await?;
    Ok(Success(ComplaintListResponse { complaints }))
}
