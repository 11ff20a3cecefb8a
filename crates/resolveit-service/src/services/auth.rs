//! Authentication service
//!
//! Handles account registration, login, token refresh and the start-up admin
//! bootstrap. Refresh tokens are stateless JWTs; the account is re-read on
//! refresh so role changes take effect.

use resolveit_common::auth::{
    hash_password, validate_password_strength, verify_password_or_reject,
};
use resolveit_common::{AdminBootstrapConfig, AppError};
use resolveit_core::entities::{NewUser, User};
use resolveit_core::{DomainError, UserRole};
use tracing::{info, instrument, warn};

use crate::dto::{
    AuthResponse, LoginRequest, RefreshTokenRequest, SignupRequest, SignupResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a regular account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<SignupResponse> {
        match request.role.as_deref().map(str::trim) {
            None | Some("" | "user") => {}
            Some("admin") => {
                return Err(ServiceError::validation(
                    "Admin accounts cannot be created through signup",
                ))
            }
            Some(other) => return Err(ServiceError::validation(format!("Unknown role: {other}"))),
        }

        let user = self
            .register(&request.name, &request.email, &request.password, UserRole::User)
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(SignupResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&user),
        })
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        verify_password_or_reject(&request.password, &password_hash).map_err(|e| {
            warn!(user_id = %user.id, "Login failed: invalid password");
            ServiceError::from(e)
        })?;

        info!(user_id = %user.id, "User logged in successfully");
        self.issue_tokens(&user)
    }

    /// Exchange a refresh token for a new pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user.id, "Tokens refreshed successfully");
        self.issue_tokens(&user)
    }

    /// Create the configured admin account unless it already exists
    ///
    /// Returns whether an account was created.
    #[instrument(skip(self, config), fields(email = %config.email))]
    pub async fn seed_admin(&self, config: &AdminBootstrapConfig) -> ServiceResult<bool> {
        if self.ctx.user_repo().email_exists(&config.email).await? {
            info!("Admin account already present");
            return Ok(false);
        }

        match self
            .register(&config.name, &config.email, &config.password, UserRole::Admin)
            .await
        {
            Ok(user) => {
                info!(user_id = %user.id, "Admin account created");
                Ok(true)
            }
            // another instance seeded it first
            Err(ServiceError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> ServiceResult<User> {
        validate_password_strength(password)?;

        let new_user = NewUser::new(name, email, role);
        if new_user.name.is_empty() {
            return Err(ServiceError::validation("Name is required"));
        }
        if self.ctx.user_repo().email_exists(&new_user.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = hash_password(password)?;

        self.ctx
            .user_repo()
            .create(&new_user, &password_hash, self.ctx.now())
            .await
            .map_err(|e| match e {
                DomainError::EmailAlreadyExists => {
                    ServiceError::conflict("Email already registered")
                }
                other => ServiceError::from(other),
            })
    }

    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user.id, user.role)?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(user),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::Harness;

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Ana Lima".into(),
            email: email.into(),
            password: "resolve123".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let h = Harness::new();
        let auth = AuthService::new(&h.ctx);

        let created = auth.signup(signup_request("Ana@Example.com")).await.unwrap();
        assert_eq!(created.user.email, "ana@example.com");
        assert_eq!(created.user.role, UserRole::User);

        let session = auth
            .login(LoginRequest {
                email: "ana@example.com".into(),
                password: "resolve123".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.token_type, "Bearer");

        let claims = h
            .ctx
            .jwt_service()
            .validate_access_token(&session.access_token)
            .unwrap();
        assert_eq!(claims.user_id().unwrap(), created.user.id);
        assert!(!claims.is_admin());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let h = Harness::new();
        let auth = AuthService::new(&h.ctx);

        auth.signup(signup_request("dup@example.com")).await.unwrap();
        let err = auth
            .signup(signup_request("DUP@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_signup_cannot_grant_admin() {
        let h = Harness::new();
        let mut request = signup_request("boss@example.com");
        request.role = Some("admin".into());

        let err = AuthService::new(&h.ctx).signup(request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let h = Harness::new();
        let auth = AuthService::new(&h.ctx);
        auth.signup(signup_request("ana@example.com")).await.unwrap();

        let err = auth
            .login(LoginRequest {
                email: "ana@example.com".into(),
                password: "wrong-pass1".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_refresh_requires_refresh_token() {
        let h = Harness::new();
        let auth = AuthService::new(&h.ctx);
        auth.signup(signup_request("ana@example.com")).await.unwrap();
        let session = auth
            .login(LoginRequest {
                email: "ana@example.com".into(),
                password: "resolve123".into(),
            })
            .await
            .unwrap();

        let refreshed = auth
            .refresh_tokens(RefreshTokenRequest {
                refresh_token: session.refresh_token,
            })
            .await
            .unwrap();
        assert_eq!(refreshed.user.email, "ana@example.com");

        let err = auth
            .refresh_tokens(RefreshTokenRequest {
                refresh_token: session.access_token,
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let h = Harness::new();
        let auth = AuthService::new(&h.ctx);
        let config = AdminBootstrapConfig {
            email: "admin@resolveit.local".into(),
            password: "admin12345".into(),
            name: "Administrator".into(),
        };

        assert!(auth.seed_admin(&config).await.unwrap());
        assert!(!auth.seed_admin(&config).await.unwrap());

        let admin = h
            .ctx
            .user_repo()
            .find_by_email("admin@resolveit.local")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin());
    }
}
