//! Complaint service
//!
//! Submission with attachment staging, public tracking and the submitter
//! listings.

use std::path::Path;

use resolveit_common::StorageConfig;
use resolveit_core::entities::NewComplaint;
use resolveit_core::{
    ComplaintId, SubmissionType, SubmitterScope, TrackingIdentifier, Urgency, UserId,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    ComplaintResponse, ComplaintUpdateResponse, CreateComplaintRequest,
    CreatedComplaintResponse, TrackComplaintResponse, UploadedFile,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const SUBMITTED_MESSAGE: &str = "Complaint submitted successfully!";

/// Complaint service
pub struct ComplaintService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ComplaintService<'a> {
    /// Create a new ComplaintService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a complaint
    ///
    /// Attachments are written to the store before the row is inserted. If a
    /// later file or the insert fails, every file staged so far is removed.
    #[instrument(skip(self, request), fields(category = %request.category, files = request.files.len()))]
    pub async fn create(
        &self,
        request: CreateComplaintRequest,
        submitter: Option<UserId>,
    ) -> ServiceResult<CreatedComplaintResponse> {
        let urgency = parse_or_default::<Urgency>("urgency", request.urgency.as_deref())?;
        let submission_type =
            parse_or_default::<SubmissionType>("submissionType", request.submission_type.as_deref())?;

        let complaint = NewComplaint::new(
            &request.category,
            &request.title,
            &request.description,
            urgency,
            submission_type,
            request.contact_info,
            submitter,
        )?;

        check_upload_policy(self.ctx.storage(), &request.files)?;

        let staged = self.stage(&request.files).await?;

        let created = match self
            .ctx
            .complaint_repo()
            .create(&complaint.with_attachments(staged.clone()), self.ctx.now())
            .await
        {
            Ok(created) => created,
            Err(e) => {
                self.discard(&staged).await;
                return Err(e.into());
            }
        };

        info!(
            complaint_id = %created.id,
            urgency = %created.urgency,
            anonymous = created.submission_type.is_anonymous(),
            "Complaint created"
        );

        Ok(CreatedComplaintResponse {
            message: SUBMITTED_MESSAGE.to_string(),
            display_code: created.display_code(),
            complaint_id: created.id,
        })
    }

    /// Public lookup by numeric id or display code
    #[instrument(skip(self))]
    pub async fn track(&self, identifier: &str) -> ServiceResult<TrackComplaintResponse> {
        let id = TrackingIdentifier::parse(identifier)
            .map_err(|e| ServiceError::validation(format!("Invalid complaint identifier: {e}")))?
            .complaint_id();

        let view = self
            .ctx
            .complaint_repo()
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Complaint", identifier.trim()))?;

        let timeline = self.ctx.complaint_repo().timeline(id, false).await?;

        Ok(TrackComplaintResponse {
            complaint: view.into(),
            timeline: timeline.into_iter().map(Into::into).collect(),
        })
    }

    /// Complaints filed by one account, newest first
    #[instrument(skip(self))]
    pub async fn list_for_submitter(&self, user_id: UserId) -> ServiceResult<Vec<ComplaintResponse>> {
        let complaints = self.ctx.complaint_repo().find_by_submitter(user_id).await?;
        Ok(complaints.into_iter().map(Into::into).collect())
    }

    /// Anonymous complaints, newest first
    #[instrument(skip(self))]
    pub async fn list_anonymous(&self) -> ServiceResult<Vec<ComplaintResponse>> {
        let complaints = self.ctx.complaint_repo().find_anonymous().await?;
        Ok(complaints.into_iter().map(Into::into).collect())
    }

    /// Listing for the overloaded `/user-complaints/:user_id` parameter
    #[instrument(skip(self))]
    pub async fn list_legacy(&self, raw: &str) -> ServiceResult<Vec<ComplaintResponse>> {
        let scope = SubmitterScope::from_legacy_param(raw)
            .map_err(|e| ServiceError::validation(format!("Invalid user id: {e}")))?;

        match scope {
            SubmitterScope::Submitter(user_id) => self.list_for_submitter(user_id).await,
            SubmitterScope::Anonymous => self.list_anonymous().await,
        }
    }

    /// Every complaint with submitter display fields, newest first
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ServiceResult<Vec<ComplaintResponse>> {
        let views = self.ctx.complaint_repo().find_all_views().await?;
        Ok(views.into_iter().map(Into::into).collect())
    }

    /// Timeline of a complaint, optionally including internal notes
    #[instrument(skip(self))]
    pub async fn timeline(
        &self,
        id: ComplaintId,
        include_internal: bool,
    ) -> ServiceResult<Vec<ComplaintUpdateResponse>> {
        if self.ctx.complaint_repo().find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Complaint", id.display_code()));
        }

        let entries = self.ctx.complaint_repo().timeline(id, include_internal).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    async fn stage(&self, files: &[UploadedFile]) -> ServiceResult<Vec<String>> {
        let mut staged = Vec::with_capacity(files.len());
        for file in files {
            match self
                .ctx
                .attachment_store()
                .save(&file.file_name, &file.bytes, self.ctx.now())
                .await
            {
                Ok(path) => staged.push(path),
                Err(e) => {
                    self.discard(&staged).await;
                    return Err(e.into());
                }
            }
        }
        Ok(staged)
    }

    /// Best-effort removal of staged files
    async fn discard(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.ctx.attachment_store().delete(path).await {
                warn!(path = %path, error = %e, "Failed to remove staged attachment");
            }
        }
    }
}

/// Blank values fall back to the default, unknown ones are rejected
fn parse_or_default<T>(field: &str, raw: Option<&str>) -> ServiceResult<T>
where
    T: std::str::FromStr + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value
            .parse()
            .map_err(|_| ServiceError::validation(format!("Invalid {field}: {value}"))),
    }
}

fn check_upload_policy(policy: &StorageConfig, files: &[UploadedFile]) -> ServiceResult<()> {
    if files.len() > policy.max_files_per_complaint {
        return Err(ServiceError::validation(format!(
            "Too many files. Maximum {} files allowed.",
            policy.max_files_per_complaint
        )));
    }

    for file in files {
        if file.bytes.len() > policy.max_file_size_bytes() {
            return Err(ServiceError::validation(format!(
                "File size too large. Maximum size is {}MB per file.",
                policy.max_file_size_mb
            )));
        }

        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let allowed = extension
            .as_deref()
            .is_some_and(|ext| policy.allowed_extensions.iter().any(|a| a == ext));
        if !allowed {
            return Err(ServiceError::validation(format!(
                "Only {} files are allowed",
                policy.allowed_extensions.join(", ")
            )));
        }
    }

    Ok(())
}
