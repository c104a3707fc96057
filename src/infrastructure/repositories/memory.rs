use crate::domain::businesses::{
    Business, BusinessRepository, NewBusiness, UpdateBusiness, VerificationStatus,
};
use crate::domain::otp::{NewOtp, OtpPurpose, OtpRecord, OtpRepository};
use crate::domain::principal::PrincipalKind;
use crate::domain::users::{NewUser, UpdateUser, User, UserRepository};
use crate::infrastructure::repositories::DuplicateKey;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use time::OffsetDateTime;
use uuid::Uuid;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DuplicateKey("users_email_key").into());
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            profile_image: new_user.profile_image,
            refresh_token_hash: None,
            verified_at: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, anyhow::Error> {
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: Uuid, update: UpdateUser) -> Result<Option<User>, anyhow::Error> {
        let mut users = lock(&self.users);
        if let Some(email) = &update.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(DuplicateKey("users_email_key").into());
            }
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(hash) = update.password_hash {
            user.password_hash = hash;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(image) = update.profile_image {
            user.profile_image = image;
        }
        if let Some(hash) = update.refresh_token_hash {
            user.refresh_token_hash = hash;
        }
        if let Some(at) = update.verified_at {
            user.verified_at = Some(at);
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut users = lock(&self.users);
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryBusinessRepository {
    businesses: Arc<Mutex<Vec<Business>>>,
}

#[async_trait]
impl BusinessRepository for InMemoryBusinessRepository {
    async fn create(&self, new_business: NewBusiness) -> Result<Business, anyhow::Error> {
        let mut businesses = lock(&self.businesses);
        if businesses.iter().any(|b| b.email == new_business.email) {
            return Err(DuplicateKey("businesses_email_key").into());
        }

        let now = OffsetDateTime::now_utc();
        let business = Business {
            id: Uuid::new_v4(),
            name: new_business.name,
            email: new_business.email,
            password_hash: new_business.password_hash,
            business_type: new_business.business_type,
            contact_number: new_business.contact_number,
            address: new_business.address,
            description: new_business.description,
            category: new_business.category,
            website: new_business.website,
            logo: None,
            photos: Vec::new(),
            verification_status: VerificationStatus::Pending,
            views: 0,
            refresh_token_hash: None,
            verified_at: None,
            created_at: now,
            updated_at: now,
        };
        businesses.push(business.clone());
        Ok(business)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, anyhow::Error> {
        Ok(lock(&self.businesses).iter().find(|b| b.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Business>, anyhow::Error> {
        Ok(lock(&self.businesses)
            .iter()
            .find(|b| b.email == email)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateBusiness,
    ) -> Result<Option<Business>, anyhow::Error> {
        let mut businesses = lock(&self.businesses);
        if let Some(email) = &update.email {
            if businesses.iter().any(|b| b.id != id && &b.email == email) {
                return Err(DuplicateKey("businesses_email_key").into());
            }
        }

        let Some(business) = businesses.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            business.name = name;
        }
        if let Some(email) = update.email {
            business.email = email;
        }
        if let Some(hash) = update.password_hash {
            business.password_hash = hash;
        }
        if let Some(business_type) = update.business_type {
            business.business_type = business_type;
        }
        if let Some(contact_number) = update.contact_number {
            business.contact_number = contact_number;
        }
        if let Some(address) = update.address {
            business.address = address;
        }
        if let Some(description) = update.description {
            business.description = description;
        }
        if let Some(category) = update.category {
            business.category = category;
        }
        if let Some(website) = update.website {
            business.website = website;
        }
        if let Some(logo) = update.logo {
            business.logo = logo;
        }
        if let Some(photos) = update.photos {
            business.photos = photos;
        }
        if let Some(status) = update.verification_status {
            business.verification_status = status;
        }
        if let Some(hash) = update.refresh_token_hash {
            business.refresh_token_hash = hash;
        }
        if let Some(at) = update.verified_at {
            business.verified_at = Some(at);
        }
        business.updated_at = OffsetDateTime::now_utc();
        Ok(Some(business.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let mut businesses = lock(&self.businesses);
        let before = businesses.len();
        businesses.retain(|b| b.id != id);
        Ok(businesses.len() < before)
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<Business>, anyhow::Error> {
        let mut businesses = lock(&self.businesses);
        Ok(businesses.iter_mut().find(|b| b.id == id).map(|b| {
            b.views += 1;
            b.clone()
        }))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryOtpRepository {
    records: Arc<Mutex<Vec<OtpRecord>>>,
}

impl InMemoryOtpRepository {
    /// Every stored record, consumed or not.
    pub fn all(&self) -> Vec<OtpRecord> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn create(&self, otp: NewOtp) -> Result<OtpRecord, anyhow::Error> {
        let record = OtpRecord {
            id: Uuid::new_v4(),
            principal_kind: otp.principal_kind,
            address: otp.address,
            code: otp.code,
            purpose: otp.purpose,
            issued_at: otp.issued_at,
            consumed_at: None,
        };
        lock(&self.records).push(record.clone());
        Ok(record)
    }

    async fn find_live(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, anyhow::Error> {
        Ok(lock(&self.records)
            .iter()
            .filter(|r| {
                r.principal_kind == kind
                    && r.address == address
                    && r.purpose == purpose
                    && r.consumed_at.is_none()
            })
            .max_by_key(|r| r.issued_at)
            .cloned())
    }

    async fn consume(&self, id: Uuid, at: OffsetDateTime) -> Result<bool, anyhow::Error> {
        let mut records = lock(&self.records);
        match records
            .iter_mut()
            .find(|r| r.id == id && r.consumed_at.is_none())
        {
            Some(record) => {
                record.consumed_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn supersede(
        &self,
        kind: PrincipalKind,
        address: &str,
        purpose: OtpPurpose,
        at: OffsetDateTime,
    ) -> Result<u64, anyhow::Error> {
        let mut count = 0;
        for record in lock(&self.records).iter_mut().filter(|r| {
            r.principal_kind == kind
                && r.address == address
                && r.purpose == purpose
                && r.consumed_at.is_none()
        }) {
            record.consumed_at = Some(at);
            count += 1;
        }
        Ok(count)
    }

    async fn delete_by_address(
        &self,
        kind: PrincipalKind,
        address: &str,
    ) -> Result<u64, anyhow::Error> {
        let mut records = lock(&self.records);
        let before = records.len();
        records.retain(|r| !(r.principal_kind == kind && r.address == address));
        Ok((before - records.len()) as u64)
    }
}
