//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    CreditService, CreditServiceImpl, CustomerService, CustomerServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgCreditRepository, PgCustomerRepository};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credit_service: Arc<dyn CreditService>,
    pub customer_service: Arc<dyn CustomerService>,
    /// Pool used by the readiness probe; absent when services run without a database
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(
        credit_service: Arc<dyn CreditService>,
        customer_service: Arc<dyn CustomerService>,
    ) -> Self {
        Self {
            credit_service,
            customer_service,
            db: None,
        }
    }

    pub fn with_database(mut self, db: PgPool) -> Self {
        self.db = Some(db);
        self
    }

    /// Wire the PostgreSQL repositories into the services.
    pub fn from_pool(db: PgPool) -> Self {
        let credit_repo = Arc::new(PgCreditRepository::new(db.clone()));
        let customer_repo = Arc::new(PgCustomerRepository::new(db.clone()));

        let credit_service = Arc::new(CreditServiceImpl::new(credit_repo, customer_repo.clone()));
        let customer_service = Arc::new(CustomerServiceImpl::new(customer_repo));

        Self::new(credit_service, customer_service).with_database(db)
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let state = AppState::from_pool(db);

        let router = build_router(state, &settings);

        let addr: SocketAddr = settings.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

/// Build the router with middleware
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors::create_cors_layer(&settings.cors))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
