//! PostgreSQL implementation of ComplaintRepository
//!
//! Every write that touches a complaint row and its update log runs inside a
//! single transaction holding `FOR UPDATE` on the complaint row, so the
//! `old_status` recorded in the log always matches what was replaced.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use resolveit_core::entities::{
    Complaint, ComplaintStats, ComplaintUpdate, ComplaintView, ExportFilter, NewComplaint,
    NewComplaintUpdate, StatusTransition, TransitionRecord,
};
use resolveit_core::traits::{ComplaintRepository, RepoResult};
use resolveit_core::value_objects::{ComplaintId, ComplaintStatus, SubmissionType, Urgency, UserId};

use crate::mappers::{convert_all, ComplaintInsert};
use crate::models::{
    ComplaintModel, ComplaintStatsModel, ComplaintUpdateModel, ComplaintWithUserModel,
};

use super::error::{complaint_not_found, map_db_error};

macro_rules! complaint_columns {
    () => {
        "id, user_id, category, title, description, urgency, submission_type, contact_info, \
         status, assigned_to, resolution_notes, file_path, created_at, updated_at, \
         resolved_at, escalated_at"
    };
}

macro_rules! joined_columns {
    () => {
        "c.id, c.user_id, c.category, c.title, c.description, c.urgency, c.submission_type, \
         c.contact_info, c.status, c.assigned_to, c.resolution_notes, c.file_path, \
         c.created_at, c.updated_at, c.resolved_at, c.escalated_at, \
         u.name AS user_name, u.email AS user_email"
    };
}

/// PostgreSQL implementation of ComplaintRepository
#[derive(Clone)]
pub struct PgComplaintRepository {
    pool: PgPool,
}

impl PgComplaintRepository {
    /// Create a new PgComplaintRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load and lock a complaint row for the rest of the transaction
    async fn lock_row(conn: &mut PgConnection, id: ComplaintId) -> RepoResult<Option<Complaint>> {
        let row = sqlx::query_as::<_, ComplaintModel>(concat!(
            "SELECT ",
            complaint_columns!(),
            " FROM complaints WHERE id = $1 FOR UPDATE"
        ))
        .bind(id.into_inner())
        .fetch_optional(conn)
        .await
        .map_err(map_db_error)?;

        row.map(Complaint::try_from).transpose()
    }

    /// Write back the mutable columns of a locked complaint
    async fn store_state(conn: &mut PgConnection, complaint: &Complaint) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE complaints
            SET status = $2,
                assigned_to = $3,
                resolution_notes = $4,
                updated_at = $5,
                resolved_at = $6,
                escalated_at = $7
            WHERE id = $1
            ",
        )
        .bind(complaint.id.into_inner())
        .bind(complaint.status.as_str())
        .bind(&complaint.assigned_to)
        .bind(&complaint.resolution_notes)
        .bind(complaint.updated_at)
        .bind(complaint.resolved_at)
        .bind(complaint.escalated_at)
        .execute(conn)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn append_update(
        conn: &mut PgConnection,
        complaint_id: ComplaintId,
        entry: &NewComplaintUpdate,
        now: DateTime<Utc>,
    ) -> RepoResult<ComplaintUpdate> {
        let model = sqlx::query_as::<_, ComplaintUpdateModel>(
            r"
            INSERT INTO complaint_updates
                (complaint_id, old_status, new_status, update_message, is_public, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, complaint_id, old_status, new_status, update_message, is_public, created_at
            ",
        )
        .bind(complaint_id.into_inner())
        .bind(entry.old_status.map(ComplaintStatus::as_str))
        .bind(entry.new_status.as_str())
        .bind(&entry.message)
        .bind(entry.is_public)
        .bind(now)
        .fetch_one(conn)
        .await
        .map_err(map_db_error)?;

        ComplaintUpdate::try_from(model)
    }
}

#[async_trait]
impl ComplaintRepository for PgComplaintRepository {
    #[instrument(skip(self, complaint), fields(category = %complaint.category))]
    async fn create(&self, complaint: &NewComplaint, now: DateTime<Utc>) -> RepoResult<Complaint> {
        let insert = ComplaintInsert::new(complaint);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ComplaintModel>(concat!(
            "INSERT INTO complaints (user_id, category, title, description, urgency, \
             submission_type, contact_info, status, file_path, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING ",
            complaint_columns!()
        ))
        .bind(insert.user_id)
        .bind(insert.category)
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.urgency)
        .bind(insert.submission_type)
        .bind(insert.contact_info)
        .bind(insert.status)
        .bind(insert.file_path)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let created = Complaint::try_from(model)?;
        Self::append_update(&mut tx, created.id, &NewComplaintUpdate::creation(), now).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ComplaintId) -> RepoResult<Option<Complaint>> {
        let result = sqlx::query_as::<_, ComplaintModel>(concat!(
            "SELECT ",
            complaint_columns!(),
            " FROM complaints WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Complaint::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_view_by_id(&self, id: ComplaintId) -> RepoResult<Option<ComplaintView>> {
        let result = sqlx::query_as::<_, ComplaintWithUserModel>(concat!(
            "SELECT ",
            joined_columns!(),
            " FROM complaints c LEFT JOIN users u ON c.user_id = u.id WHERE c.id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ComplaintView::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_submitter(&self, submitter_id: UserId) -> RepoResult<Vec<Complaint>> {
        let rows = sqlx::query_as::<_, ComplaintModel>(concat!(
            "SELECT ",
            complaint_columns!(),
            " FROM complaints WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(submitter_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn find_anonymous(&self) -> RepoResult<Vec<Complaint>> {
        let rows = sqlx::query_as::<_, ComplaintModel>(concat!(
            "SELECT ",
            complaint_columns!(),
            " FROM complaints WHERE user_id IS NULL AND submission_type = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(SubmissionType::Anonymous.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn find_all_views(&self) -> RepoResult<Vec<ComplaintView>> {
        let rows = sqlx::query_as::<_, ComplaintWithUserModel>(concat!(
            "SELECT ",
            joined_columns!(),
            " FROM complaints c LEFT JOIN users u ON c.user_id = u.id \
             ORDER BY c.created_at DESC, c.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, transition), fields(new_status = %transition.new_status))]
    async fn apply_transition(
        &self,
        id: ComplaintId,
        transition: &StatusTransition,
        now: DateTime<Utc>,
    ) -> RepoResult<TransitionRecord> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let mut complaint = Self::lock_row(&mut tx, id)
            .await?
            .ok_or_else(|| complaint_not_found(id))?;

        let entries = complaint.apply_transition(transition, now);
        Self::store_state(&mut tx, &complaint).await?;

        let mut updates = Vec::with_capacity(entries.len());
        for entry in &entries {
            updates.push(Self::append_update(&mut tx, id, entry, now).await?);
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(TransitionRecord { complaint, updates })
    }

    #[instrument(skip(self))]
    async fn find_escalation_candidates(
        &self,
        urgency: Urgency,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<Vec<Complaint>> {
        let exempt: Vec<&'static str> = ComplaintStatus::SWEEP_EXEMPT
            .iter()
            .map(|status| status.as_str())
            .collect();

        let rows = sqlx::query_as::<_, ComplaintModel>(concat!(
            "SELECT ",
            complaint_columns!(),
            " FROM complaints \
             WHERE urgency = $1 AND status <> ALL($2) AND created_at <= $3 \
             ORDER BY id"
        ))
        .bind(urgency.as_str())
        .bind(exempt)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn escalate(
        &self,
        id: ComplaintId,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<ComplaintUpdate>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let Some(mut complaint) = Self::lock_row(&mut tx, id).await? else {
            return Ok(None);
        };
        // a concurrent writer may have settled or escalated it since selection
        let Some(entry) = complaint.escalate(now) else {
            return Ok(None);
        };

        Self::store_state(&mut tx, &complaint).await?;
        let update = Self::append_update(&mut tx, id, &entry, now).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(update))
    }

    #[instrument(skip(self))]
    async fn timeline(
        &self,
        id: ComplaintId,
        include_internal: bool,
    ) -> RepoResult<Vec<ComplaintUpdate>> {
        let rows = sqlx::query_as::<_, ComplaintUpdateModel>(
            r"
            SELECT id, complaint_id, old_status, new_status, update_message, is_public, created_at
            FROM complaint_updates
            WHERE complaint_id = $1 AND (is_public OR $2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(id.into_inner())
        .bind(include_internal)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> RepoResult<ComplaintStats> {
        let model = sqlx::query_as::<_, ComplaintStatsModel>(
            r"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'New') AS new,
                COUNT(*) FILTER (WHERE status IN ('Under Review', 'In Progress')) AS pending,
                COUNT(*) FILTER (WHERE status = 'Resolved') AS resolved,
                COUNT(*) FILTER (WHERE status = 'Escalated') AS escalated,
                COUNT(*) FILTER (WHERE urgency = 'critical') AS critical,
                COUNT(*) FILTER (WHERE urgency = 'high') AS high_priority
            FROM complaints
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ComplaintStats::from(model))
    }

    #[instrument(skip(self))]
    async fn export(&self, filter: &ExportFilter) -> RepoResult<Vec<ComplaintView>> {
        let rows = sqlx::query_as::<_, ComplaintWithUserModel>(concat!(
            "SELECT ",
            joined_columns!(),
            " FROM complaints c LEFT JOIN users u ON c.user_id = u.id \
             WHERE ($1::TEXT IS NULL OR c.status = $1) \
               AND ($2::TEXT IS NULL OR c.category = $2) \
               AND ($3::TIMESTAMPTZ IS NULL OR c.created_at >= $3) \
               AND ($4::TIMESTAMPTZ IS NULL OR c.created_at < $4) \
             ORDER BY c.created_at DESC, c.id DESC"
        ))
        .bind(filter.status.map(ComplaintStatus::as_str))
        .bind(filter.category.as_deref())
        .bind(filter.created_from())
        .bind(filter.created_before())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_all(rows)
    }
}
