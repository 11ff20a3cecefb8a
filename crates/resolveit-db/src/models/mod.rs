//! Database models - SQLx-compatible structs for PostgreSQL tables

mod complaint;
mod escalation_rule;
mod user;

pub use complaint::{
    ComplaintModel, ComplaintStatsModel, ComplaintUpdateModel, ComplaintWithUserModel,
};
pub use escalation_rule::EscalationRuleModel;
pub use user::UserModel;
