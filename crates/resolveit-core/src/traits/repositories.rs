//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that touch both a complaint row and
//! its update log are single methods so implementations can run them inside
//! one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Complaint, ComplaintStats, ComplaintUpdate, ComplaintView, EscalationRule, ExportFilter,
    NewComplaint, NewUser, StatusTransition, TransitionRecord, User,
};
use crate::error::DomainError;
use crate::value_objects::{ComplaintId, Urgency, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(
        &self,
        user: &NewUser,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Complaint Repository
// ============================================================================

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Insert a complaint together with its creation log entry
    async fn create(&self, complaint: &NewComplaint, now: DateTime<Utc>) -> RepoResult<Complaint>;

    /// Find complaint by ID
    async fn find_by_id(&self, id: ComplaintId) -> RepoResult<Option<Complaint>>;

    /// Find complaint joined with its submitter's display fields
    async fn find_view_by_id(&self, id: ComplaintId) -> RepoResult<Option<ComplaintView>>;

    /// Complaints filed by a user, newest first
    async fn find_by_submitter(&self, submitter_id: UserId) -> RepoResult<Vec<Complaint>>;

    /// Anonymous complaints without a submitter, newest first
    async fn find_anonymous(&self) -> RepoResult<Vec<Complaint>>;

    /// Every complaint with submitter display fields, newest first
    async fn find_all_views(&self) -> RepoResult<Vec<ComplaintView>>;

    /// Lock the row, apply the transition and append its log entries atomically
    ///
    /// Fails with `ComplaintNotFound` when the row does not exist.
    async fn apply_transition(
        &self,
        id: ComplaintId,
        transition: &StatusTransition,
        now: DateTime<Utc>,
    ) -> RepoResult<TransitionRecord>;

    /// Eligible complaints of an urgency created at or before `cutoff`, by id
    async fn find_escalation_candidates(
        &self,
        urgency: Urgency,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<Vec<Complaint>>;

    /// Re-check eligibility under a row lock and escalate
    ///
    /// Returns `None` when the complaint vanished or is no longer eligible.
    async fn escalate(&self, id: ComplaintId, now: DateTime<Utc>)
        -> RepoResult<Option<ComplaintUpdate>>;

    /// Log entries of a complaint, newest first
    async fn timeline(
        &self,
        id: ComplaintId,
        include_internal: bool,
    ) -> RepoResult<Vec<ComplaintUpdate>>;

    /// Aggregate dashboard counters
    async fn stats(&self) -> RepoResult<ComplaintStats>;

    /// Filtered complaints with submitter display fields, newest first
    async fn export(&self, filter: &ExportFilter) -> RepoResult<Vec<ComplaintView>>;
}

// ============================================================================
// Escalation Rule Repository
// ============================================================================

#[async_trait]
pub trait EscalationRuleRepository: Send + Sync {
    /// Active rules in storage order
    ///
    /// Fails with `ConfigurationAbsent` when the rules are not provisioned.
    async fn find_active(&self) -> RepoResult<Vec<EscalationRule>>;

    /// All rules in storage order
    async fn list(&self) -> RepoResult<Vec<EscalationRule>>;

    /// Create or replace the rule of an urgency level
    async fn upsert(
        &self,
        urgency: Urgency,
        hours_before_escalation: i32,
        is_active: bool,
    ) -> RepoResult<EscalationRule>;
}
