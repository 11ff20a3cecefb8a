//! Domain entities - core business objects

mod complaint;
mod escalation_rule;
mod report;
mod update;
mod user;

pub use complaint::{Complaint, NewComplaint, StatusTransition, ATTACHMENT_SEPARATOR};
pub use escalation_rule::EscalationRule;
pub use report::{
    ComplaintStats, ComplaintView, ExportFilter, SubmitterSummary, TransitionRecord,
};
pub use update::{
    ComplaintUpdate, NewComplaintUpdate, AUTO_ESCALATION_MESSAGE, CREATION_MESSAGE,
};
pub use user::{NewUser, User};
