//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateComplaintRequest, ExportQuery, LoginRequest, RefreshTokenRequest, SignupRequest,
    UpdateComplaintRequest, UploadedFile, UpsertEscalationRuleRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, AuthResponse, ComplaintListResponse, ComplaintResponse, ComplaintUpdateResponse,
    CreatedComplaintResponse, EscalationRuleEnvelope, EscalationRuleListResponse,
    EscalationRuleResponse, EscalationRunResponse, ExportRow, HealthChecks, HealthResponse,
    MessageResponse, ReadinessResponse, SignupResponse, StatsEnvelope, StatsResponse,
    TimelineResponse, TrackComplaintResponse, UpdatedComplaintResponse, UserResponse,
};
