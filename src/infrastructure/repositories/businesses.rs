use crate::domain::businesses::{Business, BusinessRepository, NewBusiness, UpdateBusiness};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::businesses::BusinessDbModel;
use async_trait::async_trait;
use uuid::Uuid;

const BUSINESS_COLUMNS: &str = "id, name, email, password_hash, business_type, contact_number, \
     address, description, category, website, logo, photos, verification_status, views, \
     refresh_token_hash, verified_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresBusinessRepository {
    pool: DbPool,
}

impl PostgresBusinessRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PostgresBusinessRepository {
    async fn create(&self, new_business: NewBusiness) -> Result<Business, anyhow::Error> {
        let business = sqlx::query_as::<_, BusinessDbModel>(&format!(
            r#"
            INSERT INTO businesses
                (name, email, password_hash, business_type, contact_number, address,
                 description, category, website)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(new_business.name)
        .bind(new_business.email)
        .bind(new_business.password_hash)
        .bind(new_business.business_type.as_str())
        .bind(new_business.contact_number)
        .bind(new_business.address)
        .bind(new_business.description)
        .bind(new_business.category)
        .bind(new_business.website)
        .fetch_one(&self.pool)
        .await?;

        business.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, anyhow::Error> {
        let business = sqlx::query_as::<_, BusinessDbModel>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        business.map(Business::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Business>, anyhow::Error> {
        let business = sqlx::query_as::<_, BusinessDbModel>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        business.map(Business::try_from).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateBusiness,
    ) -> Result<Option<Business>, anyhow::Error> {
        let business = sqlx::query_as::<_, BusinessDbModel>(&format!(
            r#"
            UPDATE businesses SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                business_type = COALESCE($5, business_type),
                contact_number = COALESCE($6, contact_number),
                address = COALESCE($7, address),
                description = CASE WHEN $8 THEN $9 ELSE description END,
                category = CASE WHEN $10 THEN $11 ELSE category END,
                website = CASE WHEN $12 THEN $13 ELSE website END,
                logo = CASE WHEN $14 THEN $15 ELSE logo END,
                photos = COALESCE($16, photos),
                verification_status = COALESCE($17, verification_status),
                refresh_token_hash = CASE WHEN $18 THEN $19 ELSE refresh_token_hash END,
                verified_at = COALESCE($20, verified_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.name)
        .bind(update.email)
        .bind(update.password_hash)
        .bind(update.business_type.map(|t| t.as_str()))
        .bind(update.contact_number)
        .bind(update.address)
        .bind(update.description.is_some())
        .bind(update.description.flatten())
        .bind(update.category.is_some())
        .bind(update.category.flatten())
        .bind(update.website.is_some())
        .bind(update.website.flatten())
        .bind(update.logo.is_some())
        .bind(update.logo.flatten())
        .bind(update.photos)
        .bind(update.verification_status.map(|s| s.as_str()))
        .bind(update.refresh_token_hash.is_some())
        .bind(update.refresh_token_hash.flatten())
        .bind(update.verified_at)
        .fetch_optional(&self.pool)
        .await?;

        business.map(Business::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM businesses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<Business>, anyhow::Error> {
        let business = sqlx::query_as::<_, BusinessDbModel>(&format!(
            r#"
            UPDATE businesses SET views = views + 1
            WHERE id = $1
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        business.map(Business::try_from).transpose()
    }
}
