use crate::application::auth::session::SessionResolver;
use crate::application::auth::tokens::TokenIssuer;
use crate::application::credentials::CredentialStore;
use crate::application::otp::OtpLedger;
use crate::domain::auth::AuthService;
use crate::domain::businesses::BusinessRepository;
use crate::domain::clock::Clock;
use crate::domain::mailer::Mailer;
use crate::domain::otp::OtpRepository;
use crate::domain::password::PasswordHashingService;
use crate::domain::users::UserRepository;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::businesses::PostgresBusinessRepository;
use crate::infrastructure::repositories::memory::{
    InMemoryBusinessRepository, InMemoryOtpRepository, InMemoryUserRepository,
};
use crate::infrastructure::repositories::otps::PostgresOtpRepository;
use crate::infrastructure::repositories::users::PostgresUserRepository;
use std::sync::Arc;

/// Application state shared across handlers. Built once at startup; every
/// collaborator is a read-only handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: Option<DbPool>,
    pub users: Arc<dyn UserRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub otps: Arc<dyn OtpRepository>,
    pub auth_service: Arc<dyn AuthService>,
    pub password_service: Arc<dyn PasswordHashingService>,
    pub mailer: Arc<dyn Mailer>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// State backed by PostgreSQL repositories.
    pub fn postgres(
        pool: DbPool,
        config: AppConfig,
        auth_service: Arc<dyn AuthService>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            businesses: Arc::new(PostgresBusinessRepository::new(pool.clone())),
            otps: Arc::new(PostgresOtpRepository::new(pool.clone())),
            pool: Some(pool),
            auth_service,
            password_service: Arc::new(PasswordService::new()),
            mailer,
            clock,
        }
    }

    /// State backed by process-local repositories.
    pub fn in_memory(
        config: AppConfig,
        auth_service: Arc<dyn AuthService>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pool: None,
            users: Arc::new(InMemoryUserRepository::default()),
            businesses: Arc::new(InMemoryBusinessRepository::default()),
            otps: Arc::new(InMemoryOtpRepository::default()),
            auth_service,
            password_service: Arc::new(PasswordService::new()),
            mailer,
            clock,
        }
    }

    pub fn credentials(&self) -> CredentialStore {
        CredentialStore::new(
            self.users.clone(),
            self.businesses.clone(),
            self.otps.clone(),
            self.password_service.clone(),
        )
    }

    pub fn otp_ledger(&self) -> OtpLedger {
        OtpLedger::new(
            self.otps.clone(),
            self.clock.clone(),
            self.config.otp_ttl_secs,
            self.config.otp_length,
        )
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(self.auth_service.clone(), self.credentials())
    }

    pub fn session_resolver(&self) -> SessionResolver {
        SessionResolver::new(self.token_issuer(), self.credentials())
    }

    /// Closes the pool, if any. Called once on shutdown.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
