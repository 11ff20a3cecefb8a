//! Ports implemented by the infrastructure crates

mod clock;
mod repositories;
mod storage;

pub use clock::{Clock, SystemClock};
pub use repositories::{
    ComplaintRepository, EscalationRuleRepository, RepoResult, UserRepository,
};
pub use storage::AttachmentStore;
