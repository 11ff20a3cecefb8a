//! Service context - dependency container for services
//!
//! Holds the repositories, attachment store, clock and auth helpers needed by
//! the services, plus the guard that keeps escalation sweeps single-flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use resolveit_common::auth::JwtService;
use resolveit_common::StorageConfig;
use resolveit_core::traits::{
    AttachmentStore, Clock, ComplaintRepository, EscalationRuleRepository, SystemClock,
    UserRepository,
};
use tokio::sync::Mutex;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap; every clone shares the same repositories and the same
/// sweep guard.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    complaint_repo: Arc<dyn ComplaintRepository>,
    rule_repo: Arc<dyn EscalationRuleRepository>,

    // Collaborators
    attachment_store: Arc<dyn AttachmentStore>,
    clock: Arc<dyn Clock>,
    jwt_service: Arc<JwtService>,

    // Upload policy
    storage: Arc<StorageConfig>,

    // Held for the duration of one escalation sweep
    sweep_guard: Arc<Mutex<()>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        complaint_repo: Arc<dyn ComplaintRepository>,
        rule_repo: Arc<dyn EscalationRuleRepository>,
        attachment_store: Arc<dyn AttachmentStore>,
        clock: Arc<dyn Clock>,
        jwt_service: Arc<JwtService>,
        storage: StorageConfig,
    ) -> Self {
        Self {
            user_repo,
            complaint_repo,
            rule_repo,
            attachment_store,
            clock,
            jwt_service,
            storage: Arc::new(storage),
            sweep_guard: Arc::new(Mutex::new(())),
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the complaint repository
    pub fn complaint_repo(&self) -> &dyn ComplaintRepository {
        self.complaint_repo.as_ref()
    }

    /// Get the escalation rule repository
    pub fn rule_repo(&self) -> &dyn EscalationRuleRepository {
        self.rule_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the attachment store
    pub fn attachment_store(&self) -> &dyn AttachmentStore {
        self.attachment_store.as_ref()
    }

    /// Current instant according to the configured clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Upload limits applied to new complaints
    pub fn storage(&self) -> &StorageConfig {
        self.storage.as_ref()
    }

    pub(crate) fn sweep_guard(&self) -> &Mutex<()> {
        self.sweep_guard.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("storage", &self.storage)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The clock defaults to [`SystemClock`] and the upload policy to
/// [`StorageConfig::default`].
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    complaint_repo: Option<Arc<dyn ComplaintRepository>>,
    rule_repo: Option<Arc<dyn EscalationRuleRepository>>,
    attachment_store: Option<Arc<dyn AttachmentStore>>,
    clock: Option<Arc<dyn Clock>>,
    jwt_service: Option<Arc<JwtService>>,
    storage: Option<StorageConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn complaint_repo(mut self, repo: Arc<dyn ComplaintRepository>) -> Self {
        self.complaint_repo = Some(repo);
        self
    }

    pub fn rule_repo(mut self, repo: Arc<dyn EscalationRuleRepository>) -> Self {
        self.rule_repo = Some(repo);
        self
    }

    pub fn attachment_store(mut self, store: Arc<dyn AttachmentStore>) -> Self {
        self.attachment_store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.complaint_repo
                .ok_or_else(|| ServiceError::validation("complaint_repo is required"))?,
            self.rule_repo
                .ok_or_else(|| ServiceError::validation("rule_repo is required"))?,
            self.attachment_store
                .ok_or_else(|| ServiceError::validation("attachment_store is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.storage.unwrap_or_default(),
        ))
    }
}
