//! Server setup and initialization
//!
//! Provides the application builder and the server runner, which owns the
//! escalation scheduler for the lifetime of the HTTP listener.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use resolveit_common::{AppConfig, AppError, JwtService};
use resolveit_db::{
    create_pool, run_migrations, DatabaseConfig, PgComplaintRepository, PgEscalationRuleRepository,
    PgPool, PgUserRepository,
};
use resolveit_service::{
    AuthService, EscalationScheduler, LocalAttachmentStore, SchedulerHandle, ServiceContext,
    ServiceContextBuilder,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes, upload_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = create_router()
        .merge(upload_routes(&config.storage.upload_dir))
        .layer(DefaultBodyLimit::max(config.storage.max_request_bytes()));
    let api = apply_middleware_with_config(
        api,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = Router::new()
        .merge(apply_middleware(health_routes()))
        .merge(api);

    Ok(router.with_state(state))
}

/// Wire repositories, storage and JWT into a service context
pub async fn create_service_context(
    config: &AppConfig,
    pool: &PgPool,
) -> Result<ServiceContext, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let attachment_store = LocalAttachmentStore::new(&config.storage.upload_dir)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(root = %attachment_store.root().display(), "Attachment store ready");

    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .complaint_repo(Arc::new(PgComplaintRepository::new(pool.clone())))
        .rule_repo(Arc::new(PgEscalationRuleRepository::new(pool.clone())))
        .attachment_store(Arc::new(attachment_store))
        .jwt_service(jwt_service)
        .storage(config.storage.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    let service_context = create_service_context(&config, &pool).await?;

    if let Some(admin) = &config.admin {
        let created = AuthService::new(&service_context)
            .seed_admin(admin)
            .await
            .map_err(AppError::from)?;
        if created {
            info!(email = %admin.email, "Bootstrap admin account created");
        }
    }

    Ok(AppState::new(service_context, config, pool))
}

/// Start the recurring sweep unless it is disabled
pub fn start_scheduler(state: &AppState) -> Option<SchedulerHandle> {
    let escalation = &state.config().escalation;
    if !escalation.enabled {
        warn!("Escalation scheduler disabled by configuration");
        return None;
    }

    let scheduler = EscalationScheduler::new(
        state.service_context().clone(),
        Duration::from_secs(escalation.interval_secs.max(1)),
    );
    Some(scheduler.start())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let scheduler = start_scheduler(&state);
    let app = create_app(state)?;

    let result = run_server(app, &addr).await;

    if let Some(handle) = scheduler {
        handle.stop().await;
    }

    result
}
