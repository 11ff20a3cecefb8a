//! Report service - dashboard counters and filtered exports

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use resolveit_core::entities::{ComplaintView, ExportFilter};
use resolveit_core::{ComplaintStatus, DomainError};
use tracing::{info, instrument};

use crate::dto::{ExportQuery, ExportRow, StatsResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const CSV_HEADER: [&str; 11] = [
    "ID",
    "Title",
    "Category",
    "Description",
    "Priority",
    "Status",
    "Type",
    "Created",
    "Resolved",
    "User Name",
    "User Email",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Rendered export, ready for the HTTP layer
#[derive(Debug)]
pub enum ExportPayload {
    Csv { file_name: String, body: String },
    Json(Vec<ExportRow>),
}

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<StatsResponse> {
        Ok(self.ctx.complaint_repo().stats().await?.into())
    }

    #[instrument(skip(self))]
    pub async fn export(&self, query: ExportQuery) -> ServiceResult<ExportPayload> {
        let format = parse_format(query.format.as_deref())?;
        let filter = parse_filter(&query)?;

        let views = self.ctx.complaint_repo().export(&filter).await?;
        info!(rows = views.len(), format = ?format, "Complaints exported");

        match format {
            ExportFormat::Json => Ok(ExportPayload::Json(
                views.into_iter().map(ExportRow::from).collect(),
            )),
            ExportFormat::Csv => Ok(ExportPayload::Csv {
                file_name: format!("complaints-{}.csv", self.ctx.now().timestamp_millis()),
                body: render_csv(&views)?,
            }),
        }
    }
}

fn parse_format(raw: Option<&str>) -> ServiceResult<ExportFormat> {
    match raw.map(str::trim) {
        None | Some("" | "csv") => Ok(ExportFormat::Csv),
        Some("json") => Ok(ExportFormat::Json),
        Some(other) => Err(ServiceError::validation(format!(
            "Unsupported export format: {other}"
        ))),
    }
}

/// `"all"` and blank values leave a filter unset
fn active(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty() && *v != "all")
}

fn parse_filter(query: &ExportQuery) -> ServiceResult<ExportFilter> {
    let status = active(query.status.as_deref())
        .map(|s| {
            s.parse::<ComplaintStatus>()
                .map_err(|_| DomainError::InvalidStatus(s.to_string()))
        })
        .transpose()?;

    Ok(ExportFilter {
        status,
        category: active(query.category.as_deref()).map(String::from),
        date_from: parse_date("dateFrom", query.date_from.as_deref())?,
        date_to: parse_date("dateTo", query.date_to.as_deref())?,
    })
}

fn parse_date(field: &str, raw: Option<&str>) -> ServiceResult<Option<NaiveDate>> {
    active(raw)
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                ServiceError::validation(format!("Invalid {field}, expected YYYY-MM-DD: {value}"))
            })
        })
        .transpose()
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render rows as RFC 4180 CSV, quoting only where needed
pub fn render_csv(views: &[ComplaintView]) -> ServiceResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    let csv_error = |e: csv::Error| ServiceError::internal(format!("CSV export failed: {e}"));

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for view in views {
        let c = &view.complaint;
        let (user_name, user_email) = view
            .submitter
            .as_ref()
            .map_or(("", ""), |s| (s.name.as_str(), s.email.as_str()));

        writer
            .write_record([
                c.id.to_string().as_str(),
                c.title.as_str(),
                c.category.as_str(),
                c.description.as_str(),
                c.urgency.as_str(),
                c.status.as_str(),
                c.submission_type.as_str(),
                timestamp(c.created_at).as_str(),
                c.resolved_at.map(timestamp).unwrap_or_default().as_str(),
                user_name,
                user_email,
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ServiceError::internal(format!("CSV export failed: {e}")))
}
