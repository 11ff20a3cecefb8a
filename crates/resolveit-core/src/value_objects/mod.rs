//! Value objects - immutable types that represent domain concepts

mod ids;
mod status;

pub use ids::{
    ComplaintId, IdParseError, SubmitterScope, TrackingIdentifier, UserId, DISPLAY_CODE_PREFIX,
};
pub use status::{ComplaintStatus, SubmissionType, UnknownVariant, Urgency, UserRole};
