use crate::domain::businesses::{BusinessRepository, BusinessType, NewBusiness, UpdateBusiness};
use crate::domain::otp::OtpRepository;
use crate::domain::password::PasswordHashingService;
use crate::domain::principal::{Principal, PrincipalKind, normalize_email};
use crate::domain::users::{NewUser, UpdateUser, UserRepository, UserRole};
use crate::infrastructure::repositories::is_unique_violation;
use crate::shared::error::AppError;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::ValidateEmail;

pub const MIN_SECRET_LENGTH: usize = 8;

/// Identity fields for a new principal, secret still in plaintext.
#[derive(Debug, Clone)]
pub enum Registration {
    User {
        name: String,
        email: String,
        password: String,
        profile_image: Option<String>,
    },
    Business {
        name: String,
        email: String,
        password: String,
        business_type: BusinessType,
        contact_number: String,
        address: String,
        description: Option<String>,
        category: Option<String>,
        website: Option<String>,
    },
}

impl Registration {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Registration::User { .. } => PrincipalKind::User,
            Registration::Business { .. } => PrincipalKind::Business,
        }
    }
}

/// Auth-level changes shared by both principal kinds.
#[derive(Debug, Clone, Default)]
pub struct CredentialPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub verified_at: Option<OffsetDateTime>,
    pub refresh_token_hash: Option<Option<String>>,
}

/// Kind-specific profile changes carried alongside a [`CredentialPatch`].
#[derive(Debug, Clone)]
pub enum ProfilePatch {
    None,
    User(UpdateUser),
    Business(UpdateBusiness),
}

/// Persisted principals of both kinds. Secrets are hashed here and nowhere
/// else; plaintext never reaches a repository.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    businesses: Arc<dyn BusinessRepository>,
    otps: Arc<dyn OtpRepository>,
    hasher: Arc<dyn PasswordHashingService>,
}

impl CredentialStore {
    pub fn new(
        users: Arc<dyn UserRepository>,
        businesses: Arc<dyn BusinessRepository>,
        otps: Arc<dyn OtpRepository>,
        hasher: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            users,
            businesses,
            otps,
            hasher,
        }
    }

    #[tracing::instrument(skip(self, registration), fields(kind = %registration.kind()))]
    pub async fn create_principal(&self, registration: Registration) -> Result<Principal, AppError> {
        let kind = registration.kind();
        let created = match registration {
            Registration::User {
                name,
                email,
                password,
                profile_image,
            } => {
                let email = validated_email(&email)?;
                validate_secret(&password)?;
                if self.find_by_email(kind, &email).await?.is_some() {
                    return Err(AppError::DuplicateIdentity);
                }
                let password_hash = self.hasher.hash_password(&password)?;

                self.users
                    .create(NewUser {
                        name,
                        email,
                        password_hash,
                        role: UserRole::User,
                        profile_image,
                    })
                    .await
                    .map(Principal::User)
            }
            Registration::Business {
                name,
                email,
                password,
                business_type,
                contact_number,
                address,
                description,
                category,
                website,
            } => {
                let email = validated_email(&email)?;
                validate_secret(&password)?;
                if self.find_by_email(kind, &email).await?.is_some() {
                    return Err(AppError::DuplicateIdentity);
                }
                let password_hash = self.hasher.hash_password(&password)?;

                self.businesses
                    .create(NewBusiness {
                        name,
                        email,
                        password_hash,
                        business_type,
                        contact_number,
                        address,
                        description,
                        category,
                        website,
                    })
                    .await
                    .map(Principal::Business)
            }
        };

        let principal = created.map_err(store_error)?;
        tracing::info!(principal_id = %principal.id(), "Principal created");
        Ok(principal)
    }

    pub async fn find_by_id(
        &self,
        kind: PrincipalKind,
        id: Uuid,
    ) -> Result<Option<Principal>, AppError> {
        Ok(match kind {
            PrincipalKind::User => self.users.find_by_id(id).await?.map(Principal::User),
            PrincipalKind::Business => self.businesses.find_by_id(id).await?.map(Principal::Business),
        })
    }

    pub async fn find_by_email(
        &self,
        kind: PrincipalKind,
        email: &str,
    ) -> Result<Option<Principal>, AppError> {
        let email = normalize_email(email);
        Ok(match kind {
            PrincipalKind::User => self.users.find_by_email(&email).await?.map(Principal::User),
            PrincipalKind::Business => self
                .businesses
                .find_by_email(&email)
                .await?
                .map(Principal::Business),
        })
    }

    /// Never errors on a wrong secret; only a corrupt stored hash is an error.
    pub fn verify_secret(&self, principal: &Principal, candidate: &str) -> Result<bool, AppError> {
        Ok(self
            .hasher
            .verify_password(candidate, principal.password_hash())?)
    }

    #[tracing::instrument(skip(self, patch, profile))]
    pub async fn update_principal(
        &self,
        kind: PrincipalKind,
        id: Uuid,
        patch: CredentialPatch,
        profile: ProfilePatch,
    ) -> Result<Principal, AppError> {
        let email = patch.email.as_deref().map(validated_email).transpose()?;
        let password_hash = match patch.password.as_deref() {
            Some(password) => {
                validate_secret(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        if let Some(email) = &email {
            if let Some(existing) = self.find_by_email(kind, email).await? {
                if existing.id() != id {
                    return Err(AppError::DuplicateIdentity);
                }
            }
        }

        let updated = match (kind, profile) {
            (PrincipalKind::User, profile) => {
                let mut update = match profile {
                    ProfilePatch::User(update) => update,
                    ProfilePatch::None => UpdateUser::default(),
                    ProfilePatch::Business(_) => {
                        return Err(AppError::ValidationError(
                            "Business fields cannot be applied to a user".to_string(),
                        ));
                    }
                };
                update.email = email.or(update.email);
                update.password_hash = password_hash;
                update.verified_at = patch.verified_at.or(update.verified_at);
                update.refresh_token_hash = patch.refresh_token_hash.or(update.refresh_token_hash);

                self.users
                    .update(id, update)
                    .await
                    .map(|u| u.map(Principal::User))
            }
            (PrincipalKind::Business, profile) => {
                let mut update = match profile {
                    ProfilePatch::Business(update) => update,
                    ProfilePatch::None => UpdateBusiness::default(),
                    ProfilePatch::User(_) => {
                        return Err(AppError::ValidationError(
                            "User fields cannot be applied to a business".to_string(),
                        ));
                    }
                };
                update.email = email.or(update.email);
                update.password_hash = password_hash;
                update.verified_at = patch.verified_at.or(update.verified_at);
                update.refresh_token_hash = patch.refresh_token_hash.or(update.refresh_token_hash);

                self.businesses
                    .update(id, update)
                    .await
                    .map(|b| b.map(Principal::Business))
            }
        };

        updated
            .map_err(store_error)?
            .ok_or(AppError::NotFound("Principal"))
    }

    /// Removes the principal and every OTP issued to its address.
    #[tracing::instrument(skip(self))]
    pub async fn delete_principal(&self, kind: PrincipalKind, id: Uuid) -> Result<(), AppError> {
        let principal = self
            .find_by_id(kind, id)
            .await?
            .ok_or(AppError::NotFound("Principal"))?;

        let deleted = match kind {
            PrincipalKind::User => self.users.delete(id).await?,
            PrincipalKind::Business => self.businesses.delete(id).await?,
        };
        if !deleted {
            return Err(AppError::NotFound("Principal"));
        }

        let cleared = self
            .otps
            .delete_by_address(kind, principal.email())
            .await?;
        tracing::info!(otps_cleared = cleared, "Principal deleted");
        Ok(())
    }
}

fn validated_email(email: &str) -> Result<String, AppError> {
    let email = normalize_email(email);
    if !email.validate_email() {
        return Err(AppError::ValidationError("Invalid email format".to_string()));
    }
    Ok(email)
}

fn validate_secret(secret: &str) -> Result<(), AppError> {
    if secret.chars().count() < MIN_SECRET_LENGTH {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {} characters",
            MIN_SECRET_LENGTH
        )));
    }
    Ok(())
}

fn store_error(err: anyhow::Error) -> AppError {
    if is_unique_violation(&err) {
        AppError::DuplicateIdentity
    } else {
        AppError::InternalServerError(err)
    }
}
