//! # resolveit-service
//!
//! Application layer containing the complaint workflow, escalation sweep,
//! reporting and authentication use cases, their DTOs, local attachment
//! storage and the recurring escalation scheduler.

pub mod dto;
pub mod scheduler;
pub mod services;
pub mod storage;

pub use scheduler::{EscalationScheduler, SchedulerHandle};
pub use services::{
    AuthService, ComplaintService, EscalationReport, EscalationService, ExportFormat,
    ExportPayload, ReportService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SweepOutcome, WorkflowService,
};
pub use storage::LocalAttachmentStore;
