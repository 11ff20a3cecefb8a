//! In-memory collaborators for service tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use resolveit_common::auth::JwtService;
use resolveit_common::StorageConfig;
use resolveit_core::entities::{
    Complaint, ComplaintStats, ComplaintUpdate, ComplaintView, EscalationRule, ExportFilter,
    NewComplaint, NewComplaintUpdate, NewUser, StatusTransition, SubmitterSummary,
    TransitionRecord, User,
};
use resolveit_core::traits::{
    AttachmentStore, Clock, ComplaintRepository, EscalationRuleRepository, RepoResult,
    UserRepository,
};
use resolveit_core::{ComplaintId, DomainError, Urgency, UserId};

use super::context::{ServiceContext, ServiceContextBuilder};

pub fn start_of_test() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

// ============================================================================
// Clock
// ============================================================================

#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    complaints: Vec<Complaint>,
    updates: Vec<ComplaintUpdate>,
    rules: Vec<EscalationRule>,
    rules_absent: bool,
    fail_complaint_insert: bool,
}

/// One shared store backing every repository trait
#[derive(Default)]
pub struct InMemoryRepos {
    state: Mutex<State>,
}

impl InMemoryRepos {
    pub fn with_default_rules() -> Self {
        let repos = Self::default();
        {
            let mut state = repos.lock();
            for (id, (urgency, hours, active)) in [
                (Urgency::Critical, 2, true),
                (Urgency::High, 24, true),
                (Urgency::Medium, 72, true),
                (Urgency::Low, 168, false),
            ]
            .into_iter()
            .enumerate()
            {
                state.rules.push(EscalationRule {
                    id: id as i64 + 1,
                    urgency_level: urgency,
                    hours_before_escalation: hours,
                    is_active: active,
                });
            }
        }
        repos
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn set_rules_absent(&self) {
        self.lock().rules_absent = true;
    }

    pub fn fail_complaint_inserts(&self) {
        self.lock().fail_complaint_insert = true;
    }

    pub fn complaint(&self, id: ComplaintId) -> Complaint {
        self.lock()
            .complaints
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .unwrap()
    }

    pub fn complaint_count(&self) -> usize {
        self.lock().complaints.len()
    }

    pub fn updates_for(&self, id: ComplaintId) -> Vec<ComplaintUpdate> {
        self.lock()
            .updates
            .iter()
            .filter(|u| u.complaint_id == id)
            .cloned()
            .collect()
    }

    fn view(state: &State, complaint: &Complaint) -> ComplaintView {
        let submitter = complaint.submitter_id.and_then(|id| {
            state
                .users
                .iter()
                .find(|(u, _)| u.id == id)
                .map(|(u, _)| SubmitterSummary {
                    name: u.name.clone(),
                    email: u.email.clone(),
                })
        });
        ComplaintView {
            complaint: complaint.clone(),
            submitter,
        }
    }

    fn append(
        state: &mut State,
        complaint_id: ComplaintId,
        entry: NewComplaintUpdate,
        now: DateTime<Utc>,
    ) -> ComplaintUpdate {
        let id = state.updates.len() as i64 + 1;
        let update = entry.into_update(id, complaint_id, now);
        state.updates.push(update.clone());
        update
    }

    fn newest_first(mut complaints: Vec<Complaint>) -> Vec<Complaint> {
        complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        complaints
    }
}

#[async_trait]
impl UserRepository for InMemoryRepos {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(
        &self,
        user: &NewUser,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let created = User {
            id: UserId::new(state.users.len() as i64 + 1),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: now,
        };
        state.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryRepos {
    async fn create(&self, complaint: &NewComplaint, now: DateTime<Utc>) -> RepoResult<Complaint> {
        let mut state = self.lock();
        if state.fail_complaint_insert {
            return Err(DomainError::DatabaseError("insert rejected".into()));
        }
        let id = ComplaintId::new(state.complaints.len() as i64 + 1);
        let created = complaint.clone().into_complaint(id, now);
        state.complaints.push(created.clone());
        Self::append(&mut state, id, NewComplaintUpdate::creation(), now);
        Ok(created)
    }

    async fn find_by_id(&self, id: ComplaintId) -> RepoResult<Option<Complaint>> {
        Ok(self.lock().complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn find_view_by_id(&self, id: ComplaintId) -> RepoResult<Option<ComplaintView>> {
        let state = self.lock();
        Ok(state
            .complaints
            .iter()
            .find(|c| c.id == id)
            .map(|c| Self::view(&state, c)))
    }

    async fn find_by_submitter(&self, submitter_id: UserId) -> RepoResult<Vec<Complaint>> {
        let matching = self
            .lock()
            .complaints
            .iter()
            .filter(|c| c.submitter_id == Some(submitter_id))
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn find_anonymous(&self) -> RepoResult<Vec<Complaint>> {
        let matching = self
            .lock()
            .complaints
            .iter()
            .filter(|c| c.submitter_id.is_none() && c.submission_type.is_anonymous())
            .cloned()
            .collect();
        Ok(Self::newest_first(matching))
    }

    async fn find_all_views(&self) -> RepoResult<Vec<ComplaintView>> {
        let state = self.lock();
        Ok(Self::newest_first(state.complaints.clone())
            .iter()
            .map(|c| Self::view(&state, c))
            .collect())
    }

    async fn apply_transition(
        &self,
        id: ComplaintId,
        transition: &StatusTransition,
        now: DateTime<Utc>,
    ) -> RepoResult<TransitionRecord> {
        let mut state = self.lock();
        let complaint = state
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DomainError::ComplaintNotFound(id))?;
        let entries = complaint.apply_transition(transition, now);
        let complaint = complaint.clone();
        let updates = entries
            .into_iter()
            .map(|entry| Self::append(&mut state, id, entry, now))
            .collect();
        Ok(TransitionRecord { complaint, updates })
    }

    async fn find_escalation_candidates(
        &self,
        urgency: Urgency,
        cutoff: DateTime<Utc>,
    ) -> RepoResult<Vec<Complaint>> {
        Ok(self
            .lock()
            .complaints
            .iter()
            .filter(|c| {
                c.urgency == urgency && c.is_escalation_eligible() && c.created_at <= cutoff
            })
            .cloned()
            .collect())
    }

    async fn escalate(
        &self,
        id: ComplaintId,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<ComplaintUpdate>> {
        let mut state = self.lock();
        let Some(complaint) = state.complaints.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        let Some(entry) = complaint.escalate(now) else {
            return Ok(None);
        };
        Ok(Some(Self::append(&mut state, id, entry, now)))
    }

    async fn timeline(
        &self,
        id: ComplaintId,
        include_internal: bool,
    ) -> RepoResult<Vec<ComplaintUpdate>> {
        let mut entries: Vec<_> = self
            .updates_for(id)
            .into_iter()
            .filter(|u| u.is_public || include_internal)
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn stats(&self) -> RepoResult<ComplaintStats> {
        Ok(ComplaintStats::tally(&self.lock().complaints))
    }

    async fn export(&self, filter: &ExportFilter) -> RepoResult<Vec<ComplaintView>> {
        let state = self.lock();
        let matching = state
            .complaints
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        Ok(Self::newest_first(matching)
            .iter()
            .map(|c| Self::view(&state, c))
            .collect())
    }
}

#[async_trait]
impl EscalationRuleRepository for InMemoryRepos {
    async fn find_active(&self) -> RepoResult<Vec<EscalationRule>> {
        let state = self.lock();
        if state.rules_absent {
            return Err(DomainError::ConfigurationAbsent("escalation_rules".into()));
        }
        Ok(state.rules.iter().filter(|r| r.is_active).cloned().collect())
    }

    async fn list(&self) -> RepoResult<Vec<EscalationRule>> {
        Ok(self.lock().rules.clone())
    }

    async fn upsert(
        &self,
        urgency: Urgency,
        hours_before_escalation: i32,
        is_active: bool,
    ) -> RepoResult<EscalationRule> {
        let mut state = self.lock();
        if let Some(rule) = state.rules.iter_mut().find(|r| r.urgency_level == urgency) {
            rule.hours_before_escalation = hours_before_escalation;
            rule.is_active = is_active;
            return Ok(rule.clone());
        }
        let rule = EscalationRule {
            id: state.rules.len() as i64 + 1,
            urgency_level: urgency,
            hours_before_escalation,
            is_active,
        };
        state.rules.push(rule.clone());
        Ok(rule)
    }
}

// ============================================================================
// Attachment store
// ============================================================================

/// Records saved and deleted paths; can be told to fail on the n-th save
#[derive(Default)]
pub struct RecordingStore {
    saved: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    fail_on_save: Option<usize>,
}

impl RecordingStore {
    pub fn failing_on(nth: usize) -> Self {
        Self {
            fail_on_save: Some(nth),
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttachmentStore for RecordingStore {
    async fn save(
        &self,
        original_name: &str,
        _bytes: &[u8],
        _now: DateTime<Utc>,
    ) -> RepoResult<String> {
        let mut saved = self.saved.lock().unwrap();
        if self.fail_on_save == Some(saved.len()) {
            return Err(DomainError::StorageError("disk full".into()));
        }
        let path = format!("uploads/{}-{original_name}", saved.len());
        saved.push(path.clone());
        Ok(path)
    }

    async fn delete(&self, path: &str) -> RepoResult<()> {
        self.deleted.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

// ============================================================================
// Context
// ============================================================================

pub struct Harness {
    pub ctx: ServiceContext,
    pub repos: Arc<InMemoryRepos>,
    pub store: Arc<RecordingStore>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(InMemoryRepos::with_default_rules(), RecordingStore::default())
    }

    pub fn with(repos: InMemoryRepos, store: RecordingStore) -> Self {
        let repos = Arc::new(repos);
        let store = Arc::new(store);
        let clock = Arc::new(FixedClock::new(start_of_test()));
        let ctx = ServiceContextBuilder::new()
            .user_repo(repos.clone())
            .complaint_repo(repos.clone())
            .rule_repo(repos.clone())
            .attachment_store(store.clone())
            .clock(clock.clone())
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-for-service-tests",
                900,
                604_800,
            )))
            .storage(StorageConfig::default())
            .build()
            .unwrap();
        Self {
            ctx,
            repos,
            store,
            clock,
        }
    }
}
