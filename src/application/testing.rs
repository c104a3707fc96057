//! In-memory wiring shared by the application unit tests.

use crate::application::auth::session::SessionResolver;
use crate::application::auth::tokens::TokenIssuer;
use crate::application::credentials::{CredentialPatch, CredentialStore, ProfilePatch, Registration};
use crate::application::otp::OtpLedger;
use crate::domain::businesses::BusinessType;
use crate::domain::principal::Principal;
use crate::infrastructure::auth::{JwtAuthService, test_keys};
use crate::infrastructure::clock::ManualClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::mailer::MemoryMailer;
use crate::infrastructure::state::AppState;
use std::sync::Arc;

pub struct TestContext {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub mailer: Arc<MemoryMailer>,
    pub credentials: CredentialStore,
    pub ledger: OtpLedger,
    pub tokens: TokenIssuer,
    pub resolver: SessionResolver,
}

impl TestContext {
    pub fn new() -> Self {
        let config = AppConfig::default();
        let clock = Arc::new(ManualClock::default());
        let mailer = Arc::new(MemoryMailer::new());
        let auth_service = Arc::new(
            JwtAuthService::new_from_keys(
                test_keys::PRIVATE_KEY.as_bytes(),
                test_keys::PUBLIC_KEY.as_bytes(),
                config.access_token_expiry,
                config.refresh_token_expiry,
                clock.clone(),
            )
            .unwrap(),
        );
        let state = AppState::in_memory(config, auth_service, mailer.clone(), clock.clone());

        Self {
            credentials: state.credentials(),
            ledger: state.otp_ledger(),
            tokens: state.token_issuer(),
            resolver: state.session_resolver(),
            state,
            clock,
            mailer,
        }
    }

    pub fn user_registration(email: &str, password: &str) -> Registration {
        Registration::User {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            profile_image: None,
        }
    }

    pub fn business_registration(email: &str, password: &str) -> Registration {
        Registration::Business {
            name: "Test Business".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            business_type: BusinessType::Service,
            contact_number: "+15550100".to_string(),
            address: "1 Main St".to_string(),
            description: Some("Repairs".to_string()),
            category: None,
            website: None,
        }
    }

    async fn verified(&self, registration: Registration) -> Principal {
        let principal = self.credentials.create_principal(registration).await.unwrap();
        self.credentials
            .update_principal(
                principal.kind(),
                principal.id(),
                CredentialPatch {
                    verified_at: Some(time::OffsetDateTime::now_utc()),
                    ..Default::default()
                },
                ProfilePatch::None,
            )
            .await
            .unwrap()
    }

    pub async fn verified_user(&self, email: &str, password: &str) -> Principal {
        self.verified(Self::user_registration(email, password)).await
    }

    pub async fn verified_business(&self, email: &str, password: &str) -> Principal {
        self.verified(Self::business_registration(email, password))
            .await
    }
}
