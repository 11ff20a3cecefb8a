//! # resolveit-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, verify_password_or_reject, Claims,
    JwtService, TokenPair, TokenType,
};
pub use config::{
    AdminBootstrapConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, EscalationConfig, JwtConfig, RateLimitConfig, ServerConfig, StorageConfig,
};
pub use error::AppError;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
