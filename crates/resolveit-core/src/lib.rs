//! # resolveit-core
//!
//! Domain layer containing complaint entities, value objects, workflow rules and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Complaint, ComplaintStats, ComplaintUpdate, ComplaintView, EscalationRule, ExportFilter,
    NewComplaint, NewComplaintUpdate, NewUser, StatusTransition, SubmitterSummary,
    TransitionRecord, User,
};
pub use error::DomainError;
pub use traits::{
    AttachmentStore, Clock, ComplaintRepository, EscalationRuleRepository, RepoResult,
    SystemClock, UserRepository,
};
pub use value_objects::{
    ComplaintId, ComplaintStatus, SubmissionType, SubmitterScope, TrackingIdentifier, Urgency,
    UserId, UserRole,
};
