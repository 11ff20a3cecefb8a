//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod complaint;
pub mod context;
pub mod error;
pub mod escalation;
pub mod report;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use complaint::ComplaintService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use escalation::{EscalationReport, EscalationService, SweepOutcome};
pub use report::{ExportFormat, ExportPayload, ReportService};
pub use workflow::WorkflowService;
