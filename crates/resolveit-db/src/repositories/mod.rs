//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in resolveit-core.
//! Each repository handles database operations for a specific domain entity.

mod complaint;
mod error;
mod escalation_rule;
mod user;

pub use complaint::PgComplaintRepository;
pub use escalation_rule::PgEscalationRuleRepository;
pub use user::PgUserRepository;
