//! Authentication handlers
//!
//! Endpoints for account signup, login and token refresh.

use axum::extract::State;
use resolveit_service::dto::{
    AuthResponse, LoginRequest, RefreshTokenRequest, SignupRequest, SignupResponse,
};
use resolveit_service::AuthService;

use crate::extractors::{JsonBody, ValidatedJson};
use crate::response::{ApiResult, Created, Success};
use crate::state::AppState;

/// Create an account
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Success<SignupResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(Created(Success(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Success<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Success(response))
}

/// Exchange a refresh token for a new pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RefreshTokenRequest>,
) -> ApiResult<Success<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Success(response))
}
