use crate::domain::businesses::Business;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct BusinessDbModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub business_type: String,
    pub contact_number: String,
    pub address: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,
    pub photos: Vec<String>,
    pub verification_status: String,
    pub views: i64,
    pub refresh_token_hash: Option<String>,
    pub verified_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<BusinessDbModel> for Business {
    type Error = anyhow::Error;

    fn try_from(model: BusinessDbModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            business_type: model.business_type.parse()?,
            contact_number: model.contact_number,
            address: model.address,
            description: model.description,
            category: model.category,
            website: model.website,
            logo: model.logo,
            photos: model.photos,
            verification_status: model.verification_status.parse()?,
            views: model.views,
            refresh_token_hash: model.refresh_token_hash,
            verified_at: model.verified_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
