use crate::application::auth::tokens::TokenIssuer;
use crate::application::credentials::CredentialStore;
use crate::domain::auth::TokenError;
use crate::domain::principal::{Principal, PrincipalKind};
use crate::shared::error::AppError;

/// Why a request could not be tied to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    TokenNotFound,
    InvalidOrExpired,
    PrincipalNotFound,
}

impl From<SessionRejection> for AppError {
    // A missing principal and a bad signature must look the same to clients.
    fn from(rejection: SessionRejection) -> Self {
        match rejection {
            SessionRejection::TokenNotFound => AppError::TokenNotFound,
            SessionRejection::InvalidOrExpired | SessionRejection::PrincipalNotFound => {
                AppError::InvalidOrExpired(TokenError::Invalid)
            }
        }
    }
}

/// Failure inside the resolver: either a rejection or a store error.
#[derive(Debug)]
pub enum ResolveError {
    Rejected(SessionRejection),
    Store(AppError),
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Rejected(rejection) => rejection.into(),
            ResolveError::Store(err) => err,
        }
    }
}

/// Order in which collections are probed for a token's subject.
pub const PROBE_ORDER: [PrincipalKind; 2] = [PrincipalKind::User, PrincipalKind::Business];

/// Turns an access token into exactly one principal. Read-only.
#[derive(Clone)]
pub struct SessionResolver {
    tokens: TokenIssuer,
    credentials: CredentialStore,
}

impl SessionResolver {
    pub fn new(tokens: TokenIssuer, credentials: CredentialStore) -> Self {
        Self {
            tokens,
            credentials,
        }
    }

    #[tracing::instrument(skip(self, access_token))]
    pub async fn resolve(&self, access_token: Option<&str>) -> Result<Principal, ResolveError> {
        let token = access_token
            .filter(|t| !t.is_empty())
            .ok_or(ResolveError::Rejected(SessionRejection::TokenNotFound))?;

        let subject = self.tokens.verify_access_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            ResolveError::Rejected(SessionRejection::InvalidOrExpired)
        })?;

        // Every collection is probed so lookup cost does not depend on kind.
        let mut resolved = None;
        for kind in PROBE_ORDER {
            let found = self
                .credentials
                .find_by_id(kind, subject.principal_id)
                .await
                .map_err(ResolveError::Store)?;

            match found {
                Some(principal) if kind == subject.kind => resolved = Some(principal),
                Some(_) => tracing::warn!(
                    principal_id = %subject.principal_id,
                    claimed = %subject.kind,
                    found = %kind,
                    "Token subject id present in a different collection; ignored"
                ),
                None => {}
            }
        }

        resolved.ok_or_else(|| {
            tracing::debug!(principal_id = %subject.principal_id, "Token subject no longer exists");
            ResolveError::Rejected(SessionRejection::PrincipalNotFound)
        })
    }
}

/// Route-level guard on top of a resolved principal.
pub fn require_kind(principal: &Principal, required: PrincipalKind) -> Result<(), AppError> {
    if principal.kind() != required {
        return Err(AppError::WrongPrincipalKind);
    }
    Ok(())
}
