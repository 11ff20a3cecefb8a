//! Multipart complaint submission extractor

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use resolveit_service::dto::{CreateComplaintRequest, UploadedFile};

use crate::response::ApiError;

/// Form field carrying the attachments
pub const FILES_FIELD: &str = "files";

/// A complaint submission collected from `multipart/form-data`
///
/// Text fields accept both camelCase and snake_case names. Attachments are
/// read from `files` parts; an empty file input is skipped. Unknown fields,
/// including a client-supplied `userId`, are ignored.
#[derive(Debug)]
pub struct ComplaintForm(pub CreateComplaintRequest);

#[async_trait]
impl<S> FromRequest<S> for ComplaintForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let mut request = CreateComplaintRequest::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILES_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                request.files.push(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
                continue;
            }

            let value = field.text().await?;
            match name.as_str() {
                "category" => request.category = value,
                "title" => request.title = value,
                "description" => request.description = value,
                "urgency" => request.urgency = Some(value),
                "submissionType" | "submission_type" => request.submission_type = Some(value),
                "contactInfo" | "contact_info" => request.contact_info = Some(value),
                _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
            }
        }

        Ok(ComplaintForm(request))
    }
}
